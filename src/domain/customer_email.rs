use validator::ValidateEmail;

#[derive(Debug, Clone)]
pub struct CustomerEmail(String);

impl CustomerEmail{
    pub fn parse(s: String) -> Result<CustomerEmail, String>{
        if s.validate_email(){
            Ok(Self(s))
        } else {
            Err(format!("{} is not a valid customer email", s))
        }
    }

    pub fn inner(&self) -> String {
        self.0.clone()
    }
}

impl AsRef<str> for CustomerEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CustomerEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
