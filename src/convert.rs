//! Unit conversions between drink volume, grams of ethanol and energy.

/// Density of ethanol at room temperature, g/mL.
pub const ETHANOL_DENSITY_G_PER_ML: f64 = 0.789;

/// Energy released per gram of ethanol, kcal.
pub const KCAL_PER_GRAM_ALCOHOL: f64 = 7.0;

pub fn ethanol_grams(volume_ml: f64, abv_percent: f64) -> f64 {
    ethanol_grams_with_density(volume_ml, abv_percent, ETHANOL_DENSITY_G_PER_ML)
}

pub fn ethanol_grams_with_density(volume_ml: f64, abv_percent: f64, density: f64) -> f64 {
    volume_ml * (abv_percent / 100.0) * density
}

pub fn calories(volume_ml: f64, kcal_per_100ml: f64) -> f64 {
    (volume_ml / 100.0) * kcal_per_100ml
}

pub fn calories_from_grams_alcohol(grams: f64) -> f64 {
    grams * KCAL_PER_GRAM_ALCOHOL
}

/// Rounds grams to one decimal place for display.
pub fn round_grams(grams: f64) -> f64 {
    (grams * 10.0).round() / 10.0
}

pub fn round_kcal(kcal: f64) -> i64 {
    kcal.round() as i64
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub grams: f64,
    pub kcal: f64,
}

/// Strength/volume calculator used when the user records grams directly.
/// Returns `None` unless both inputs are finite and positive.
pub fn estimate_from_strength(abv_percent: f64, volume_ml: f64) -> Option<Estimate> {
    let valid = |value: f64| value.is_finite() && value > 0.0;
    if !valid(abv_percent) || !valid(volume_ml) || abv_percent > 100.0 {
        return None;
    }

    let grams = ethanol_grams(volume_ml, abv_percent);
    Some(Estimate {
        grams: round_grams(grams),
        kcal: calories_from_grams_alcohol(grams),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn vodka_shot_matches_reference_values() {
        assert!(close(ethanol_grams(50.0, 40.0), 15.78));
        assert!(close(calories(50.0, 231.0), 115.5));
    }

    #[test]
    fn ethanol_grams_is_linear_and_monotonic() {
        let volumes = [1.0, 33.0, 250.0, 500.0, 1000.0];
        let strengths = [0.5, 4.5, 12.0, 40.0, 100.0];
        for &volume in &volumes {
            for &abv in &strengths {
                assert!(close(ethanol_grams(volume, abv), volume * abv * 0.00789));
            }
        }
        for pair in volumes.windows(2) {
            assert!(ethanol_grams(pair[0], 12.0) < ethanol_grams(pair[1], 12.0));
        }
        for pair in strengths.windows(2) {
            assert!(ethanol_grams(330.0, pair[0]) < ethanol_grams(330.0, pair[1]));
        }
    }

    #[test]
    fn grams_calorie_model_uses_seven_kcal() {
        assert!(close(calories_from_grams_alcohol(10.0), 70.0));
    }

    #[test]
    fn display_rounding() {
        assert_eq!(round_grams(15.78), 15.8);
        assert_eq!(round_grams(0.04), 0.0);
        assert_eq!(round_kcal(115.5), 116);
        assert_eq!(round_kcal(115.4), 115);
    }

    #[test]
    fn estimate_rejects_non_positive_input() {
        assert!(estimate_from_strength(0.0, 500.0).is_none());
        assert!(estimate_from_strength(5.0, -1.0).is_none());
        assert!(estimate_from_strength(f64::NAN, 500.0).is_none());
        assert!(estimate_from_strength(120.0, 500.0).is_none());

        let estimate = estimate_from_strength(5.0, 500.0).unwrap();
        assert_eq!(estimate.grams, 19.7);
        assert!(close(estimate.kcal, 138.075));
    }

    #[test]
    fn estimate_kcal_uses_unrounded_grams() {
        let estimate = estimate_from_strength(40.0, 50.0).unwrap();
        assert_eq!(estimate.grams, 15.8);
        assert!(close(estimate.kcal, 110.46));
        assert_eq!(round_kcal(estimate.kcal), 110);
    }
}
