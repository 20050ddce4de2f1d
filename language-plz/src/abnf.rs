pub const COMMA: char = ',';
pub const HYPHEN: char = '-';
pub const SEMICOLON: char = ';';
pub const STAR: &str = "*";
