use ratatui::style::Color;

/// Header color for a severity label. Matching ignores case.
pub fn severity_color(severity: &str) -> Color {
    match severity.to_lowercase().as_str() {
        "debug" => Color::Indexed(8),
        "info" => Color::Indexed(10),
        "warn" => Color::Indexed(11),
        "error" => Color::Indexed(9),
        _ => Color::Indexed(7),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_severities() {
        assert_eq!(severity_color("debug"), Color::Indexed(8));
        assert_eq!(severity_color("info"), Color::Indexed(10));
        assert_eq!(severity_color("warn"), Color::Indexed(11));
        assert_eq!(severity_color("error"), Color::Indexed(9));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(severity_color("ERROR"), Color::Indexed(9));
        assert_eq!(severity_color("Info"), Color::Indexed(10));
        assert_eq!(severity_color("wArN"), Color::Indexed(11));
    }

    #[test]
    fn test_unknown_is_neutral() {
        assert_eq!(severity_color(""), Color::Indexed(7));
        assert_eq!(severity_color("warning"), Color::Indexed(7));
        assert_eq!(severity_color("fatal"), Color::Indexed(7));
    }
}
