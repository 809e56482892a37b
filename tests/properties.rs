//! Property-based tests for the estimator and line counter.

use codecost::backends::count::LineCounter;
use codecost::estimate;
use proptest::prelude::*;

fn source_text() -> impl Strategy<Value = String> {
    prop::collection::vec("[ a-z0-9/*#\"'<!\\-]{0,16}", 0..40).prop_map(|lines| lines.join("\n"))
}

proptest! {
    // ========================
    // Estimator Properties
    // ========================

    #[test]
    fn estimate_zero_lines_is_zero(team in 1u32..100, salary in 1.0f64..100_000.0) {
        prop_assert_eq!(estimate(0, team, salary).as_tuple(), (0.0, 0.0));
    }

    #[test]
    fn estimate_is_finite_and_non_negative(
        lines in 0usize..2_000_000,
        team in 1u32..200,
        salary in 0.01f64..1_000_000.0,
    ) {
        let result = estimate(lines, team, salary);
        prop_assert!(result.calendar_months.is_finite() && result.calendar_months >= 0.0);
        prop_assert!(result.total_cost.is_finite() && result.total_cost >= 0.0);
    }

    #[test]
    fn cost_is_team_times_months_times_salary(
        lines in 0usize..500_000,
        team in 1u32..50,
        salary in 1.0f64..50_000.0,
    ) {
        let result = estimate(lines, team, salary);
        let expected = f64::from(team) * result.calendar_months * salary;
        prop_assert!((result.total_cost - expected).abs() <= 1e-9 * expected.max(1.0));
    }

    #[test]
    fn more_lines_never_take_less_time(a in 0usize..200_000, b in 0usize..200_000, team in 1u32..20) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let lo_months = estimate(lo, team, 1000.0).calendar_months;
        let hi_months = estimate(hi, team, 1000.0).calendar_months;
        prop_assert!(lo_months <= hi_months, "{} -> {}, {} -> {}", lo, lo_months, hi, hi_months);
    }

    #[test]
    fn bigger_team_never_takes_longer(lines in 1usize..200_000, team in 1u32..60) {
        let smaller = estimate(lines, team, 1000.0).calendar_months;
        let bigger = estimate(lines, team + 1, 1000.0).calendar_months;
        prop_assert!(bigger <= smaller);
    }

    // ========================
    // Line Counter Properties
    // ========================

    #[test]
    fn total_is_newline_count_plus_one(content in source_text()) {
        let counts = LineCounter::default().count_content("rs", &content);
        prop_assert_eq!(counts.total, content.matches('\n').count() + 1);
    }

    #[test]
    fn code_and_empty_fit_in_total(content in source_text(), ext in "(py|rs|html|sql|rb|sh|css)") {
        let counts = LineCounter::default().count_content(&ext, &content);
        prop_assert!(counts.empty <= counts.total);
        prop_assert!(counts.code + counts.empty <= counts.total);
    }

    #[test]
    fn no_rules_means_code_is_non_blank_lines(content in source_text()) {
        let counts = LineCounter::default().count_content("css", &content);
        prop_assert_eq!(counts.code, counts.total - counts.empty);
    }
}
