//! Running-average rating updates.

use crate::error::{CatalogError, Result};

/// Lowest star value the rating widget can submit.
pub const MIN_STARS: u8 = 1;
/// Highest star value the rating widget can submit.
pub const MAX_STARS: u8 = 5;

/// Fold one submitted star value into a running average.
///
/// Returns the new `(rating, ratings_count)`. The average is updated in
/// place from the previous average, not recomputed from individual ratings.
///
/// # Example
/// ```
/// use rimas_catalog::rating::fold_rating;
///
/// let (rating, count) = fold_rating(4.0, 10, 5).unwrap();
/// assert_eq!(count, 11);
/// assert!((rating - 45.0 / 11.0).abs() < 1e-12);
/// ```
pub fn fold_rating(rating: f64, ratings_count: u32, stars: u8) -> Result<(f64, u32)> {
    if !(MIN_STARS..=MAX_STARS).contains(&stars) {
        return Err(CatalogError::InvalidRating(stars));
    }

    let count = f64::from(ratings_count);
    let folded = (rating * count + f64::from(stars)) / (count + 1.0);

    Ok((folded, ratings_count.saturating_add(1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_running_average() {
        let (rating, count) = fold_rating(4.0, 10, 5).unwrap();
        assert_eq!(count, 11);
        assert!((rating - 4.090_909_090_909_091).abs() < 1e-9);
    }

    #[test]
    fn test_first_rating() {
        assert_eq!(fold_rating(0.0, 0, 3).unwrap(), (3.0, 1));
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(matches!(fold_rating(4.0, 10, 0), Err(CatalogError::InvalidRating(0))));
        assert!(matches!(fold_rating(4.0, 10, 6), Err(CatalogError::InvalidRating(6))));
    }

    proptest! {
        #[test]
        fn prop_stays_within_bounds(rating in 1.0f64..=5.0, count in 0u32..10_000, stars in 1u8..=5) {
            let (folded, new_count) = fold_rating(rating, count, stars).unwrap();
            prop_assert_eq!(new_count, count + 1);
            prop_assert!(folded >= 1.0 - 1e-9 && folded <= 5.0 + 1e-9);
            prop_assert!(folded >= rating.min(f64::from(stars)) - 1e-9);
            prop_assert!(folded <= rating.max(f64::from(stars)) + 1e-9);
        }
    }
}
