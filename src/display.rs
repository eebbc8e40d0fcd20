/// Display mapping for user records
///
/// Pure functions that turn raw record fields into what the directory shows:
/// - role → badge color scheme
/// - merit score → Bronze / Silver / Gold tier
/// - violation count → None / Low / High severity
///
/// The merit thresholds (>100 gold, >5 silver) are the only business rule in
/// the dashboard, so they live here and nowhere else.

use iced::Color;

/// The role that may use the dashboard
pub const PRIVILEGED_ROLE: &str = "admin";

/// Merit score above which a user is Gold
const GOLD_THRESHOLD: i64 = 100;
/// Merit score above which a user is Silver
const SILVER_THRESHOLD: i64 = 5;

/// Whether a role grants access to the dashboard.
///
/// Case-insensitive and ignores surrounding whitespace, so "admin", "Admin"
/// and "ADMIN" all qualify. Login and the Admins stat card share this rule.
pub fn is_privileged(role: &str) -> bool {
    role.trim().eq_ignore_ascii_case(PRIVILEGED_ROLE)
}

/// Background, text and border colors for a badge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScheme {
    pub background: Color,
    pub text: Color,
    pub border: Color,
}

impl ColorScheme {
    fn from_hex(background: u32, text: u32, border: u32) -> Self {
        Self {
            background: hex(background),
            text: hex(text),
            border: hex(border),
        }
    }
}

/// Convert a 0xRRGGBB literal into an iced color
pub(crate) fn hex(rgb: u32) -> Color {
    Color::from_rgb8(
        ((rgb >> 16) & 0xff) as u8,
        ((rgb >> 8) & 0xff) as u8,
        (rgb & 0xff) as u8,
    )
}

fn purple() -> ColorScheme {
    ColorScheme::from_hex(0xf3e8ff, 0x6b21a8, 0xe9d5ff)
}

fn blue() -> ColorScheme {
    ColorScheme::from_hex(0xdbeafe, 0x1e40af, 0xbfdbfe)
}

fn gray() -> ColorScheme {
    ColorScheme::from_hex(0xf3f4f6, 0x1f2937, 0xe5e7eb)
}

fn yellow() -> ColorScheme {
    ColorScheme::from_hex(0xfef9c3, 0x854d0e, 0xfef08a)
}

fn orange() -> ColorScheme {
    ColorScheme::from_hex(0xffedd5, 0x9a3412, 0xfed7aa)
}

/// Badge category for a role string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleKind {
    Admin,
    Moderator,
    Member,
}

impl RoleKind {
    pub fn classify(role: &str) -> Self {
        let role = role.trim();
        if role.eq_ignore_ascii_case(PRIVILEGED_ROLE) {
            RoleKind::Admin
        } else if role.eq_ignore_ascii_case("moderator") {
            RoleKind::Moderator
        } else {
            RoleKind::Member
        }
    }

    pub fn scheme(self) -> ColorScheme {
        match self {
            RoleKind::Admin => purple(),
            RoleKind::Moderator => blue(),
            RoleKind::Member => gray(),
        }
    }
}

/// Color scheme of the role badge
pub fn role_scheme(role: &str) -> ColorScheme {
    RoleKind::classify(role).scheme()
}

/// Three-tier merit ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeritTier {
    Bronze,
    Silver,
    Gold,
}

impl MeritTier {
    pub fn from_score(score: i64) -> Self {
        if score > GOLD_THRESHOLD {
            MeritTier::Gold
        } else if score > SILVER_THRESHOLD {
            MeritTier::Silver
        } else {
            MeritTier::Bronze
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MeritTier::Bronze => "Bronze",
            MeritTier::Silver => "Silver",
            MeritTier::Gold => "Gold",
        }
    }

    pub fn scheme(self) -> ColorScheme {
        match self {
            MeritTier::Gold => yellow(),
            MeritTier::Silver => orange(),
            MeritTier::Bronze => gray(),
        }
    }
}

/// Merit badge text, e.g. "Gold (150)"
pub fn merit_label(score: i64) -> String {
    format!("{} ({})", MeritTier::from_score(score).name(), score)
}

/// How worried an admin should be about a user's violations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    None,
    Low,
    High,
}

impl Severity {
    pub fn from_count(count: u32) -> Self {
        match count {
            0 => Severity::None,
            1..=2 => Severity::Low,
            _ => Severity::High,
        }
    }

    /// Status colors: tinted background with a strong foreground.
    /// Violation pills have no border, so it matches the background.
    pub fn scheme(self) -> ColorScheme {
        match self {
            Severity::None => ColorScheme::from_hex(0xf0fdf4, 0x16a34a, 0xf0fdf4),
            Severity::Low => ColorScheme::from_hex(0xfefce8, 0xca8a04, 0xfefce8),
            Severity::High => ColorScheme::from_hex(0xfef2f2, 0xdc2626, 0xfef2f2),
        }
    }
}

/// Violation pill text: "Clean Record", "1 violation", "4 violations"
pub fn violation_label(count: u32) -> String {
    match count {
        0 => "Clean Record".to_string(),
        1 => "1 violation".to_string(),
        n => format!("{} violations", n),
    }
}

/// Member number for a zero-based table row, e.g. row 0 → "#001"
pub fn member_number(row: usize) -> String {
    format!("#{:03}", row + 1)
}

/// Avatar letter: uppercased first character of the email
pub fn avatar_initial(email: &str) -> String {
    match email.trim().chars().next() {
        Some(c) => c.to_uppercase().collect(),
        None => "?".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merit_tier_thresholds() {
        assert_eq!(MeritTier::from_score(i64::MIN), MeritTier::Bronze);
        assert_eq!(MeritTier::from_score(-3), MeritTier::Bronze);
        assert_eq!(MeritTier::from_score(0), MeritTier::Bronze);
        assert_eq!(MeritTier::from_score(5), MeritTier::Bronze);
        assert_eq!(MeritTier::from_score(6), MeritTier::Silver);
        assert_eq!(MeritTier::from_score(100), MeritTier::Silver);
        assert_eq!(MeritTier::from_score(101), MeritTier::Gold);
        assert_eq!(MeritTier::from_score(i64::MAX), MeritTier::Gold);
    }

    #[test]
    fn test_merit_tier_matches_rule_over_range() {
        for m in -50..=250 {
            let expected = if m > 100 {
                MeritTier::Gold
            } else if m > 5 {
                MeritTier::Silver
            } else {
                MeritTier::Bronze
            };
            assert_eq!(MeritTier::from_score(m), expected, "score {}", m);
        }
    }

    #[test]
    fn test_severity_levels() {
        assert_eq!(Severity::from_count(0), Severity::None);
        assert_eq!(Severity::from_count(1), Severity::Low);
        assert_eq!(Severity::from_count(2), Severity::Low);
        assert_eq!(Severity::from_count(3), Severity::High);
        assert_eq!(Severity::from_count(u32::MAX), Severity::High);
    }

    #[test]
    fn test_merit_labels() {
        assert_eq!(merit_label(150), "Gold (150)");
        assert_eq!(merit_label(10), "Silver (10)");
        assert_eq!(merit_label(5), "Bronze (5)");
    }

    #[test]
    fn test_privileged_role_is_case_insensitive() {
        assert!(is_privileged("admin"));
        assert!(is_privileged("Admin"));
        assert!(is_privileged(" ADMIN "));
        assert!(!is_privileged("administrator"));
        assert!(!is_privileged("USER"));
        assert!(!is_privileged(""));
    }

    #[test]
    fn test_role_schemes() {
        assert_eq!(role_scheme("Admin"), purple());
        assert_eq!(role_scheme("moderator"), blue());
        assert_eq!(role_scheme("USER"), gray());
        assert_eq!(RoleKind::classify("Moderator"), RoleKind::Moderator);
    }

    #[test]
    fn test_tier_and_severity_colors_differ() {
        assert_ne!(MeritTier::Gold.scheme(), MeritTier::Silver.scheme());
        assert_eq!(MeritTier::Bronze.scheme(), gray());
        assert_ne!(Severity::None.scheme(), Severity::High.scheme());
    }

    #[test]
    fn test_hex_conversion() {
        let c = hex(0xff8000);
        assert_eq!(c, Color::from_rgb8(255, 128, 0));
    }

    #[test]
    fn test_violation_labels() {
        assert_eq!(violation_label(0), "Clean Record");
        assert_eq!(violation_label(1), "1 violation");
        assert_eq!(violation_label(3), "3 violations");
    }

    #[test]
    fn test_member_number_and_initial() {
        assert_eq!(member_number(0), "#001");
        assert_eq!(member_number(41), "#042");
        assert_eq!(member_number(1233), "#1234");
        assert_eq!(avatar_initial("alice@example.com"), "A");
        assert_eq!(avatar_initial(""), "?");
    }
}
