#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SmtpContentType {
    #[default]
    TextPlain,
    TextHtml,
}
