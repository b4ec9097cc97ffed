use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeverageKind {
    pub id: &'static str,
    pub name: &'static str,
    pub abv_percent: f64,
    pub kcal_per_100ml: f64,
}

/// Typical ABV and energy values. The first entry doubles as the fallback
/// kind for ids the catalog does not know.
pub const CATALOG: [BeverageKind; 9] = [
    kind("beer", "Beer", 5.0, 43.0),
    kind("cider", "Cider", 4.5, 50.0),
    kind("wine_red", "Red wine", 12.0, 85.0),
    kind("wine_white", "White wine", 11.0, 80.0),
    kind("champagne", "Sparkling wine", 11.0, 76.0),
    kind("vodka", "Vodka", 40.0, 231.0),
    kind("whiskey", "Whiskey", 40.0, 250.0),
    kind("gin", "Gin", 40.0, 263.0),
    kind("rum", "Rum", 40.0, 231.0),
];

const fn kind(
    id: &'static str,
    name: &'static str,
    abv_percent: f64,
    kcal_per_100ml: f64,
) -> BeverageKind {
    BeverageKind {
        id,
        name,
        abv_percent,
        kcal_per_100ml,
    }
}

pub fn all() -> &'static [BeverageKind] {
    &CATALOG
}

pub fn default_kind() -> &'static BeverageKind {
    &CATALOG[0]
}

pub fn find(id: &str) -> Option<&'static BeverageKind> {
    CATALOG.iter().find(|kind| kind.id == id)
}

/// Resolves `id`, falling back to [`default_kind`] when it is unknown.
pub fn lookup(id: &str) -> &'static BeverageKind {
    find(id).unwrap_or_else(default_kind)
}
