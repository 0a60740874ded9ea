//! Family rotation-compatibility rules
//!
//! Each family maps to 1-3 preferred successor families. Position in the
//! list is the preference rank (0 = strongest).

use super::crops::CropFamily;

/// Preferred successor families after `family`, strongest first
pub fn preferred_successors(family: CropFamily) -> &'static [CropFamily] {
    use CropFamily::*;
    match family {
        Cereal => &[Legume, Allium, Solanaceae],
        Legume => &[Cereal, Solanaceae, Grass],
        CashCrop => &[Legume, Cereal, Allium],
        Grass => &[Legume, Allium, Cereal],
        Solanaceae => &[Legume, Cereal, Allium],
        Allium => &[Cereal, Legume, Solanaceae],
    }
}

/// Preference rank of `next` after `previous`, if it is a preferred successor
pub fn successor_rank(previous: CropFamily, next: CropFamily) -> Option<usize> {
    preferred_successors(previous).iter().position(|f| *f == next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_have_one_to_three_entries_without_self() {
        use CropFamily::*;
        for family in [Cereal, Legume, CashCrop, Grass, Solanaceae, Allium] {
            let succ = preferred_successors(family);
            assert!((1..=3).contains(&succ.len()));
            assert!(!succ.contains(&family));
        }
    }

    #[test]
    fn test_rank() {
        assert_eq!(successor_rank(CropFamily::Cereal, CropFamily::Legume), Some(0));
        assert_eq!(successor_rank(CropFamily::Cereal, CropFamily::Solanaceae), Some(2));
        assert_eq!(successor_rank(CropFamily::Cereal, CropFamily::Grass), None);
    }
}
