//! Add-user form: field buffers, focus handling and validation.
//!
//! Validation runs on submit. Each failing field gets one message; the form
//! is only turned into a [`NewUser`] when no field fails.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;
use std::num::IntErrorKind;

use crate::model::{Gender, NewUser};

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern");
}

/// Form fields in tab order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Gender,
    Age,
    City,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::FirstName,
        FormField::LastName,
        FormField::Email,
        FormField::Gender,
        FormField::Age,
        FormField::City,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::FirstName => "First Name",
            FormField::LastName => "Last Name",
            FormField::Email => "Email",
            FormField::Gender => "Gender",
            FormField::Age => "Age",
            FormField::City => "City",
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Validation messages keyed by field, in tab order.
pub type FormErrors = BTreeMap<FormField, String>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: Option<Gender>,
    pub age: String,
    pub city: String,
    pub focus: Option<FormField>,
    pub errors: FormErrors,
}

impl UserForm {
    pub fn new() -> Self {
        Self {
            focus: Some(FormField::FirstName),
            ..Self::default()
        }
    }

    pub fn focused(&self) -> FormField {
        self.focus.unwrap_or(FormField::FirstName)
    }

    pub fn focus_next(&mut self) {
        self.focus = Some(self.focused().next());
    }

    pub fn focus_prev(&mut self) {
        self.focus = Some(self.focused().prev());
    }

    /// Text shown for `field`; gender renders its choice or an empty string.
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Email => &self.email,
            FormField::Gender => self.gender.map(Gender::as_str).unwrap_or(""),
            FormField::Age => &self.age,
            FormField::City => &self.city,
        }
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::FirstName => Some(&mut self.first_name),
            FormField::LastName => Some(&mut self.last_name),
            FormField::Email => Some(&mut self.email),
            FormField::Age => Some(&mut self.age),
            FormField::City => Some(&mut self.city),
            FormField::Gender => None,
        }
    }

    /// Type a character into the focused field. On the gender field, `m`/`f`
    /// pick a value and space cycles.
    pub fn push_char(&mut self, c: char) {
        let field = self.focused();
        if let Some(buf) = self.text_mut(field) {
            buf.push(c);
            return;
        }
        match c.to_ascii_lowercase() {
            'm' => self.gender = Some(Gender::Male),
            'f' => self.gender = Some(Gender::Female),
            ' ' => self.cycle_gender(true),
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        let field = self.focused();
        match self.text_mut(field) {
            Some(buf) => {
                buf.pop();
            }
            None => self.gender = None,
        }
    }

    /// Step through unset → male → female (or the reverse).
    pub fn cycle_gender(&mut self, forward: bool) {
        self.gender = match (self.gender, forward) {
            (None, true) => Some(Gender::Male),
            (Some(Gender::Male), true) => Some(Gender::Female),
            (Some(Gender::Female), true) => None,
            (None, false) => Some(Gender::Female),
            (Some(Gender::Female), false) => Some(Gender::Male),
            (Some(Gender::Male), false) => None,
        };
    }

    pub fn validate(&self) -> Result<NewUser, FormErrors> {
        let mut errors = FormErrors::new();
        for field in [FormField::FirstName, FormField::LastName, FormField::City] {
            if self.value(field).trim().is_empty() {
                errors.insert(field, format!("{} is required", field.label()));
            }
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.insert(FormField::Email, "Email is required".to_string());
        } else if !EMAIL_RE.is_match(email) {
            errors.insert(FormField::Email, "Invalid email address".to_string());
        }

        if self.gender.is_none() {
            errors.insert(FormField::Gender, "Gender is required".to_string());
        }

        let age = self.age.trim();
        let parsed_age = if age.is_empty() {
            errors.insert(FormField::Age, "Age is required".to_string());
            None
        } else {
            match age.parse::<u32>() {
                Ok(n) if n > 0 => Some(n),
                Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
                    errors.insert(FormField::Age, "Age is too large".to_string());
                    None
                }
                _ => {
                    errors.insert(FormField::Age, "Age must be a positive whole number".to_string());
                    None
                }
            }
        };

        match (self.gender, parsed_age) {
            (Some(gender), Some(age)) if errors.is_empty() => Ok(NewUser {
                first_name: self.first_name.trim().to_string(),
                last_name: self.last_name.trim().to_string(),
                email: email.to_string(),
                gender,
                age,
                city: self.city.trim().to_string(),
            }),
            _ => Err(errors),
        }
    }

    /// Validate and record the errors on the form. Returns the submission when valid.
    pub fn submit(&mut self) -> Option<NewUser> {
        match self.validate() {
            Ok(user) => {
                self.errors.clear();
                Some(user)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> UserForm {
        UserForm {
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            email: "ann@lee.dev".into(),
            gender: Some(Gender::Female),
            age: "30".into(),
            city: "Rome".into(),
            ..UserForm::new()
        }
    }

    #[test]
    fn valid_form_produces_new_user() {
        let user = filled().validate().unwrap();
        assert_eq!(user.first_name, "Ann");
        assert_eq!(user.age, 30);
        assert_eq!(user.gender, Gender::Female);
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let errs = UserForm::new().validate().unwrap_err();
        assert_eq!(errs.len(), 6);
        assert_eq!(errs[&FormField::FirstName], "First Name is required");
        assert_eq!(errs[&FormField::LastName], "Last Name is required");
        assert_eq!(errs[&FormField::Email], "Email is required");
        assert_eq!(errs[&FormField::Gender], "Gender is required");
        assert_eq!(errs[&FormField::Age], "Age is required");
        assert_eq!(errs[&FormField::City], "City is required");
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let mut f = filled();
        f.city = "   ".into();
        let errs = f.validate().unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[&FormField::City], "City is required");
    }

    #[test]
    fn email_must_look_like_an_address() {
        for bad in ["ann", "ann@lee", "@lee.dev", "ann lee@x.io"] {
            let mut f = filled();
            f.email = bad.into();
            let errs = f.validate().unwrap_err();
            assert_eq!(errs[&FormField::Email], "Invalid email address", "{bad}");
        }
    }

    #[test]
    fn age_must_be_positive_integer() {
        for bad in ["0", "-3", "abc", "2.5"] {
            let mut f = filled();
            f.age = bad.into();
            let errs = f.validate().unwrap_err();
            assert_eq!(errs[&FormField::Age], "Age must be a positive whole number", "{bad}");
        }
    }

    #[test]
    fn age_overflow_is_reported_as_too_large() {
        let mut f = filled();
        f.age = "99999999999".into();
        let errs = f.validate().unwrap_err();
        assert_eq!(errs[&FormField::Age], "Age is too large");
    }

    #[test]
    fn typing_goes_to_focused_field() {
        let mut f = UserForm::new();
        f.push_char('A');
        f.focus_next();
        f.push_char('B');
        f.backspace();
        f.push_char('C');
        assert_eq!(f.first_name, "A");
        assert_eq!(f.last_name, "C");
    }

    #[test]
    fn gender_field_takes_choice_keys() {
        let mut f = UserForm::new();
        f.focus = Some(FormField::Gender);
        f.push_char('f');
        assert_eq!(f.gender, Some(Gender::Female));
        f.push_char(' ');
        assert_eq!(f.gender, None);
        f.cycle_gender(false);
        assert_eq!(f.gender, Some(Gender::Female));
        f.backspace();
        assert_eq!(f.gender, None);
    }

    #[test]
    fn focus_wraps_around() {
        assert_eq!(FormField::City.next(), FormField::FirstName);
        assert_eq!(FormField::FirstName.prev(), FormField::City);
    }

    #[test]
    fn submit_stores_errors_and_clears_them_when_fixed() {
        let mut f = filled();
        f.first_name.clear();
        assert!(f.submit().is_none());
        assert_eq!(f.errors[&FormField::FirstName], "First Name is required");
        f.first_name = "Ann".into();
        assert!(f.submit().is_some());
        assert!(f.errors.is_empty());
    }
}
