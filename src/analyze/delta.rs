/// Period-over-period change rendered for a metric card.
///
/// `"-"` when there is nothing to compare against, `"+∞%"` when growing from
/// zero, otherwise the signed change with one decimal.
pub fn delta(current: f64, previous: Option<f64>) -> String {
    let Some(previous) = previous else {
        return "-".to_string();
    };
    if previous == 0.0 {
        return if current == 0.0 {
            "-".to_string()
        } else {
            "+∞%".to_string()
        };
    }
    if current == previous {
        return "0%".to_string();
    }
    let change = (current - previous) / previous.abs() * 100.0;
    format!("{change:+.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_values() {
        assert_eq!(delta(0.0, Some(0.0)), "-");
        assert_eq!(delta(5.0, Some(0.0)), "+∞%");
        assert_eq!(delta(10.0, Some(10.0)), "0%");
        assert_eq!(delta(15.0, Some(10.0)), "+50.0%");
    }

    #[test]
    fn missing_previous_is_undefined() {
        assert_eq!(delta(3.0, None), "-");
    }

    #[test]
    fn decreases_are_negative() {
        assert_eq!(delta(2.0, Some(3.0)), "-33.3%");
        assert_eq!(delta(0.0, Some(8.0)), "-100.0%");
    }
}
