/// Rounds three percentages of one total to integers that sum to exactly 100.
///
/// Each value is clamped to `0..=100` and rounded half away from zero. If the
/// two largest rounded values exceed 100 together, the smaller of the two
/// gives up the overflow. The remaining value becomes `100 - (the other two)`.
/// Equal values rank by position, earlier first.
pub fn partition_percentages(raw: [f64; 3]) -> [u32; 3] {
    let mut rounded = raw.map(|v| {
        let clamped = if v.is_finite() { v.clamp(0.0, 100.0) } else { 0.0 };
        clamped.round() as u32
    });

    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| rounded[b].cmp(&rounded[a]).then(a.cmp(&b)));
    let [largest, second, rest] = order;

    let top_two = rounded[largest] + rounded[second];
    if top_two > 100 {
        rounded[second] -= top_two - 100;
    }
    rounded[rest] = 100 - rounded[largest] - rounded[second];
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn exact_shares_need_no_correction() {
        assert_eq!(partition_percentages([58.0, 19.0, 23.0]), [58, 19, 23]);
    }

    #[test]
    fn overflow_reduces_second_largest() {
        // 50.5 and 49.5 both round up: 51 + 50 = 101.
        assert_eq!(partition_percentages([50.5, 49.5, 0.0]), [51, 49, 0]);
    }

    #[test]
    fn remainder_absorbs_rounding_loss() {
        let third = 100.0 / 3.0;
        assert_eq!(partition_percentages([third, third, third]), [33, 33, 34]);
    }

    #[test]
    fn ties_rank_by_position() {
        // 50.4 rounds to 50 twice, the third slot takes the rest.
        assert_eq!(partition_percentages([50.4, 50.4, 0.0]), [50, 50, 0]);
        assert_eq!(partition_percentages([0.0, 50.5, 50.5]), [0, 51, 49]);
    }

    #[test]
    fn out_of_range_inputs_are_clamped() {
        assert_eq!(partition_percentages([150.0, -20.0, f64::NAN]), [100, 0, 0]);
        assert_eq!(partition_percentages([0.0, 0.0, 0.0]), [0, 0, 100]);
    }

    proptest! {
        #[test]
        fn always_sums_to_one_hundred(a in -10.0f64..120.0, b in -10.0f64..120.0, c in -10.0f64..120.0) {
            let parts = partition_percentages([a, b, c]);
            prop_assert_eq!(parts.iter().sum::<u32>(), 100);
        }

        #[test]
        fn shares_of_a_total_stay_within_one_point(x in 0.0f64..1.0, y in 0.0f64..1.0) {
            let first = 100.0 * x;
            let second = (100.0 - first) * y;
            let third = 100.0 - first - second;
            let raw = [first, second, third];
            let parts = partition_percentages(raw);

            prop_assert_eq!(parts.iter().sum::<u32>(), 100);
            for (part, value) in parts.iter().zip(raw) {
                prop_assert!((*part as f64 - value).abs() < 1.5);
            }
        }

        #[test]
        fn overflow_only_touches_second_largest(x in 0.0f64..1.0) {
            // Two shares ending in .5 always overflow after rounding.
            let first = (x * 99.0).floor() + 0.5;
            let raw = [first, 100.0 - first, 0.0];
            let rounded = raw.map(|v| v.round() as u32);
            prop_assume!(rounded[0] + rounded[1] > 100);

            let parts = partition_percentages(raw);
            let (big, small) = if rounded[0] >= rounded[1] { (0, 1) } else { (1, 0) };
            prop_assert_eq!(parts[big], rounded[big]);
            prop_assert_eq!(parts[small], rounded[small] - 1);
            prop_assert_eq!(parts[2], 0);
        }
    }
}
