/// Identifier of a vendor-hosted email template.
///
/// The vendor addresses templates by numeric id, so anything empty or
/// non-numeric is rejected up front.
#[derive(Debug, Clone)]
pub struct TemplateId(String);

impl TemplateId {
    pub fn parse(s: String) -> Result<Self, String> {
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("{} is not a valid template id.", s));
        }
        Ok(Self(s))
    }
}

impl AsRef<str> for TemplateId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
