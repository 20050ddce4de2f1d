pub const CRLF: &str = "\r\n";
pub const DOT: char = '.';
pub const HTTP_PREFIX: &str = "HTTP/";
pub const SP: char = ' ';
