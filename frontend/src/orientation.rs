use serde::{Deserialize, Serialize};
use web_sys::DomTokenList;

use crate::error::DomError;

pub const DEFAULT_LANDSCAPE_ABOVE: f64 = 1.3;
pub const DEFAULT_PORTRAIT_BELOW: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Landscape,
    Portrait,
    Square,
}

impl Orientation {
    pub const ALL: [Orientation; 3] = [
        Orientation::Landscape,
        Orientation::Portrait,
        Orientation::Square,
    ];

    pub const CLASS_NAMES: [&'static str; 3] = ["landscape", "portrait", "square"];

    pub fn class_name(&self) -> &'static str {
        match self {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
            Orientation::Square => "square",
        }
    }

    /// `None` when either dimension is zero, i.e. the image never produced
    /// usable pixels.
    pub fn from_dimensions(
        width: u32,
        height: u32,
        thresholds: &OrientationThresholds,
    ) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(thresholds.classify_ratio(f64::from(width) / f64::from(height)))
    }
}

/// Width/height ratio bounds. Both bounds are exclusive, so a ratio equal
/// to either one lands in `Square`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientationThresholds {
    pub landscape_above: f64,
    pub portrait_below: f64,
}

impl Default for OrientationThresholds {
    fn default() -> Self {
        Self {
            landscape_above: DEFAULT_LANDSCAPE_ABOVE,
            portrait_below: DEFAULT_PORTRAIT_BELOW,
        }
    }
}

impl OrientationThresholds {
    pub fn classify_ratio(&self, ratio: f64) -> Orientation {
        if ratio > self.landscape_above {
            Orientation::Landscape
        } else if ratio < self.portrait_below {
            Orientation::Portrait
        } else {
            Orientation::Square
        }
    }
}

/// A mutable set of CSS classes on one element.
pub trait ClassSet {
    fn remove_classes(&self, names: &[&str]) -> Result<(), DomError>;
    fn add_class(&self, name: &str) -> Result<(), DomError>;
}

impl ClassSet for DomTokenList {
    fn remove_classes(&self, names: &[&str]) -> Result<(), DomError> {
        for name in names {
            self.remove_1(name)
                .map_err(|err| DomError::js("classList.remove", err))?;
        }
        Ok(())
    }

    fn add_class(&self, name: &str) -> Result<(), DomError> {
        self.add_1(name).map_err(|err| DomError::js("classList.add", err))
    }
}

/// Replaces whatever orientation label the set carries with `orientation`.
pub fn apply_orientation<S>(classes: &S, orientation: Orientation) -> Result<(), DomError>
where
    S: ClassSet + ?Sized,
{
    classes.remove_classes(&Orientation::CLASS_NAMES)?;
    classes.add_class(orientation.class_name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::BTreeSet;

    #[derive(Default)]
    struct MemoryClasses(RefCell<BTreeSet<String>>);

    impl MemoryClasses {
        fn with(names: &[&str]) -> Self {
            Self(RefCell::new(names.iter().map(|n| n.to_string()).collect()))
        }

        fn labels(&self) -> Vec<String> {
            self.0
                .borrow()
                .iter()
                .filter(|name| Orientation::CLASS_NAMES.contains(&name.as_str()))
                .cloned()
                .collect()
        }
    }

    impl ClassSet for MemoryClasses {
        fn remove_classes(&self, names: &[&str]) -> Result<(), DomError> {
            let mut set = self.0.borrow_mut();
            for name in names {
                set.remove(*name);
            }
            Ok(())
        }

        fn add_class(&self, name: &str) -> Result<(), DomError> {
            self.0.borrow_mut().insert(name.to_string());
            Ok(())
        }
    }

    fn classify(width: u32, height: u32) -> Option<Orientation> {
        Orientation::from_dimensions(width, height, &OrientationThresholds::default())
    }

    #[test]
    fn wide_images_are_landscape() {
        assert_eq!(classify(1600, 900), Some(Orientation::Landscape));
    }

    #[test]
    fn tall_images_are_portrait() {
        assert_eq!(classify(900, 1600), Some(Orientation::Portrait));
    }

    #[test]
    fn even_images_are_square() {
        assert_eq!(classify(1000, 1000), Some(Orientation::Square));
    }

    #[test]
    fn bounds_are_exclusive_and_fall_into_square() {
        let thresholds = OrientationThresholds::default();
        assert_eq!(thresholds.classify_ratio(1.3), Orientation::Square);
        assert_eq!(thresholds.classify_ratio(0.9), Orientation::Square);
        assert_eq!(classify(13, 10), Some(Orientation::Square));
        assert_eq!(classify(9, 10), Some(Orientation::Square));
        assert_eq!(thresholds.classify_ratio(1.300_001), Orientation::Landscape);
        assert_eq!(thresholds.classify_ratio(0.899_999), Orientation::Portrait);
    }

    #[test]
    fn every_ratio_maps_to_exactly_one_category() {
        let thresholds = OrientationThresholds::default();
        for step in 1..=400 {
            let ratio = f64::from(step) * 0.01;
            let expected = if ratio > 1.3 {
                Orientation::Landscape
            } else if ratio < 0.9 {
                Orientation::Portrait
            } else {
                Orientation::Square
            };
            assert_eq!(thresholds.classify_ratio(ratio), expected, "ratio {ratio}");
        }
    }

    #[test]
    fn zero_dimensions_yield_no_orientation() {
        assert_eq!(classify(0, 900), None);
        assert_eq!(classify(1600, 0), None);
        assert_eq!(classify(0, 0), None);
    }

    #[test]
    fn custom_thresholds_shift_the_bands() {
        let thresholds = OrientationThresholds {
            landscape_above: 2.0,
            portrait_below: 0.5,
        };
        assert_eq!(
            Orientation::from_dimensions(1600, 900, &thresholds),
            Some(Orientation::Square)
        );
        assert_eq!(
            Orientation::from_dimensions(2100, 1000, &thresholds),
            Some(Orientation::Landscape)
        );
    }

    #[test]
    fn apply_orientation_keeps_unrelated_classes() {
        let classes = MemoryClasses::with(&["post-image-container", "rounded"]);
        apply_orientation(&classes, Orientation::Portrait).unwrap();
        let all = classes.0.borrow();
        assert!(all.contains("post-image-container"));
        assert!(all.contains("rounded"));
        assert!(all.contains("portrait"));
    }

    #[test]
    fn reclassifying_leaves_a_single_label() {
        let classes = MemoryClasses::default();
        apply_orientation(&classes, Orientation::Landscape).unwrap();
        apply_orientation(&classes, Orientation::Portrait).unwrap();
        assert_eq!(classes.labels(), vec!["portrait".to_string()]);

        let stale = MemoryClasses::with(&["landscape", "portrait", "square"]);
        apply_orientation(&stale, Orientation::Square).unwrap();
        assert_eq!(stale.labels(), vec!["square".to_string()]);
    }

    #[test]
    fn class_names_match_all_variants() {
        let names: Vec<_> = Orientation::ALL.iter().map(|o| o.class_name()).collect();
        assert_eq!(names, Orientation::CLASS_NAMES);
    }
}
