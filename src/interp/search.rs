//! Bracketing binary search over monotonic arrays.

/// Finds the pair of indices bracketing `value` in a monotonic `array`
/// (increasing or decreasing).
///
/// - Outside the array's range both bounds collapse onto the nearest end.
/// - An exact hit collapses both bounds onto the matching index.
/// - Otherwise the result is `[low, high]` with `high - low == 1` and
///   `value` strictly between `array[low]` and `array[high]`.
///
/// An empty array yields `[0, 0]`.
///
/// ```rust
/// use diva_core::interp::binary_search;
/// let xs = [1.0, 2.0, 4.0, 8.0];
/// assert_eq!(binary_search(&xs, 3.0), [1, 2]);
/// assert_eq!(binary_search(&xs, 4.0), [2, 2]);
/// assert_eq!(binary_search(&xs, -1.0), [0, 0]);
/// assert_eq!(binary_search(&[8.0, 4.0, 2.0], 3.0), [1, 2]);
/// ```
pub fn binary_search(array: &[f64], value: f64) -> [usize; 2] {
    let Some(last) = array.len().checked_sub(1) else {
        return [0, 0];
    };
    let decreasing = array[last] < array[0];
    let (min_end, max_end) = if decreasing { (last, 0) } else { (0, last) };

    if value <= array[min_end] {
        return [min_end, min_end];
    }
    if value >= array[max_end] {
        return [max_end, max_end];
    }

    let (mut low, mut high) = (0, last);
    while high - low > 1 {
        let mid = low + (high - low) / 2;
        let m = array[mid];
        if m == value {
            return [mid, mid];
        }
        if (m < value) != decreasing {
            low = mid;
        } else {
            high = mid;
        }
    }
    [low, high]
}
