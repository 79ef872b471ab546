//! Named `&`-code color constants used by server-generated chat lines.

pub const ESCAPE: char = '&';

pub const BLACK: &str = "&0";
pub const DARK_BLUE: &str = "&1";
pub const DARK_GREEN: &str = "&2";
pub const DARK_TEAL: &str = "&3";
pub const DARK_RED: &str = "&4";
pub const PURPLE: &str = "&5";
pub const GOLD: &str = "&6";
pub const GRAY: &str = "&7";
pub const DARK_GRAY: &str = "&8";
pub const BLUE: &str = "&9";
pub const GREEN: &str = "&a";
pub const TEAL: &str = "&b";
pub const RED: &str = "&c";
pub const PINK: &str = "&d";
pub const YELLOW: &str = "&e";
pub const WHITE: &str = "&f";
