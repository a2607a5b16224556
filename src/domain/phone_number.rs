use std::fmt::Debug;

use phonenumber::country;


#[derive(Debug, Clone)]
pub struct PhoneNumber(pub String);

impl PhoneNumber{
    pub fn parse(number: String) -> Result<PhoneNumber, String>{
        if phonenumber::parse(Some(country::IN), number.clone()).is_ok(){
            Ok(Self(number))
        } else {
            Err(format!("{} is not a valid phone number", number))
        }
    }

    pub fn inner(&self) -> String {
        self.0.clone()
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
