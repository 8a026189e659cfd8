/// Percentage of completed lessons, rounded to the nearest integer.
/// A course with no lessons counts as 0, not as division by zero.
pub(crate) fn completion_percentage(completed: i64, total: i64) -> i32 {
    if total <= 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as i32
}

#[cfg(test)]
mod tests {
    use super::completion_percentage;

    #[test]
    fn empty_course_is_zero_percent() {
        assert_eq!(completion_percentage(0, 0), 0);
    }

    #[test]
    fn rounds_to_nearest_integer() {
        assert_eq!(completion_percentage(1, 3), 33);
        assert_eq!(completion_percentage(2, 3), 67);
        assert_eq!(completion_percentage(1, 2), 50);
        assert_eq!(completion_percentage(4, 5), 80);
    }

    #[test]
    fn all_lessons_complete_is_one_hundred() {
        assert_eq!(completion_percentage(7, 7), 100);
    }
}
