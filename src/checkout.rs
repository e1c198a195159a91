//! Checkout
//!
//! A local-only order simulation: validate the shipping form, issue a random
//! order number, and empty the cart. Nothing is sent anywhere.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    time::Duration,
};

use rand::Rng;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

use crate::{
    cart::{CartLine, CartStore},
    notifications::{DEFAULT_DISPLAY_DURATION, Severity},
    storage::KeyValueStore,
};

const ORDER_PLACED_DURATION: Duration = Duration::from_millis(5000);

/// Shipping details entered by the shopper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    /// Full name
    pub name: String,

    /// Contact phone number
    pub phone: String,

    /// Country
    pub country: String,

    /// Province or wilaya
    pub province: String,

    /// Street address
    pub home_address: String,
}

/// A form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Full name
    Name,

    /// Phone number
    Phone,

    /// Country
    Country,

    /// Province or wilaya
    Province,

    /// Street address
    HomeAddress,
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Field::Name => "name",
            Field::Phone => "phone",
            Field::Country => "country",
            Field::Province => "province",
            Field::HomeAddress => "home address",
        })
    }
}

/// Validation messages, at most one per field, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: Vec<(Field, &'static str)>,
}

impl FormErrors {
    /// The message for `field`, if it failed validation.
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|(failed, _)| *failed == field)
            .map(|(_, message)| *message)
    }

    /// Whether every field passed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Failing fields and their messages.
    pub fn failures(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.errors.iter().copied()
    }

    fn push(&mut self, field: Field, message: &'static str) {
        self.errors.push((field, message));
    }
}

impl Display for FormErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (index, (field, message)) in self.errors.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }

            write!(f, "{field}: {message}")?;
        }

        Ok(())
    }
}

fn check_text(
    errors: &mut FormErrors,
    field: Field,
    value: &str,
    min_chars: usize,
    required: &'static str,
    too_short: &'static str,
) {
    let value = value.trim();

    if value.is_empty() {
        errors.push(field, required);
    } else if value.chars().count() < min_chars {
        errors.push(field, too_short);
    }
}

impl CheckoutForm {
    /// Check every field, collecting all failures.
    ///
    /// # Errors
    ///
    /// Returns the [`FormErrors`] for each field that failed.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();

        check_text(
            &mut errors,
            Field::Name,
            &self.name,
            3,
            "Name is required",
            "Name must be at least 3 characters",
        );

        if self.phone.trim().is_empty() {
            errors.push(Field::Phone, "Phone number is required");
        } else if self.phone.chars().filter(char::is_ascii_digit).count() < 10 {
            errors.push(
                Field::Phone,
                "Please enter a valid phone number (at least 10 digits)",
            );
        }

        check_text(
            &mut errors,
            Field::Country,
            &self.country,
            2,
            "Country is required",
            "Please enter a valid country name",
        );

        check_text(
            &mut errors,
            Field::Province,
            &self.province,
            2,
            "Wilaya/Province is required",
            "Please enter a valid province name",
        );

        check_text(
            &mut errors,
            Field::HomeAddress,
            &self.home_address,
            5,
            "Home address is required",
            "Please enter a more detailed address",
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Order confirmation code, `ORD-` followed by six digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Draw a fresh order number from `rng`.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        Self(format!("ORD-{}", rng.gen_range(100_000..=999_999)))
    }

    /// The code as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OrderNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// What the shopper sees once an order is placed.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfirmation {
    /// Confirmation code
    pub order_number: OrderNumber,

    /// Shipping details as submitted
    pub shipping: CheckoutForm,

    /// Lines that were in the cart
    pub lines: Vec<CartLine>,

    /// Order total
    pub total: Decimal,
}

/// Checkout errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// There is nothing to order
    #[error("cannot check out an empty cart")]
    EmptyCart,

    /// The shipping form has invalid fields
    #[error("invalid checkout form: {0}")]
    InvalidForm(FormErrors),
}

/// Place an order for everything in `cart`, then empty it.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] if the cart has no lines, or
/// [`CheckoutError::InvalidForm`] if the shipping form fails validation. The
/// cart is left untouched in both cases.
pub fn place_order<S, R>(
    cart: &mut CartStore<S>,
    form: CheckoutForm,
    rng: &mut R,
) -> Result<OrderConfirmation, CheckoutError>
where
    S: KeyValueStore,
    R: Rng,
{
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    if let Err(errors) = form.validate() {
        cart.notify_for(
            "Please fill all required fields correctly",
            Severity::Error,
            DEFAULT_DISPLAY_DURATION,
        );

        return Err(CheckoutError::InvalidForm(errors));
    }

    let confirmation = OrderConfirmation {
        order_number: OrderNumber::generate(rng),
        shipping: form,
        lines: cart.lines().to_vec(),
        total: cart.total_price(),
    };

    info!(
        order_number = %confirmation.order_number,
        lines = confirmation.lines.len(),
        total = %confirmation.total,
        "order placed"
    );

    cart.notify_for(
        "Order placed successfully!",
        Severity::Success,
        ORDER_PLACED_DURATION,
    );

    cart.clear();

    Ok(confirmation)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn valid_form() -> CheckoutForm {
        CheckoutForm {
            name: "Amina Haddad".to_string(),
            phone: "+213 555 12 34 56".to_string(),
            country: "Algeria".to_string(),
            province: "Oran".to_string(),
            home_address: "12 Rue Larbi Ben M'hidi".to_string(),
        }
    }

    #[test]
    fn valid_form_passes() {
        assert_eq!(valid_form().validate(), Ok(()));
    }

    #[test]
    fn blank_form_reports_every_field_as_required() {
        let errors = CheckoutForm::default()
            .validate()
            .err()
            .unwrap_or_default();

        assert_eq!(errors.len(), 5);
        assert_eq!(errors.get(Field::Name), Some("Name is required"));
        assert_eq!(errors.get(Field::Phone), Some("Phone number is required"));
        assert_eq!(errors.get(Field::Country), Some("Country is required"));
        assert_eq!(errors.get(Field::Province), Some("Wilaya/Province is required"));
        assert_eq!(errors.get(Field::HomeAddress), Some("Home address is required"));
    }

    #[test]
    fn short_values_are_rejected() {
        let form = CheckoutForm {
            name: " Al ".to_string(),
            phone: "555-1234".to_string(),
            country: "A".to_string(),
            province: "O".to_string(),
            home_address: "1 Rd".to_string(),
        };

        let errors = form.validate().err().unwrap_or_default();

        assert_eq!(
            errors.get(Field::Name),
            Some("Name must be at least 3 characters")
        );
        assert_eq!(
            errors.get(Field::Phone),
            Some("Please enter a valid phone number (at least 10 digits)")
        );
        assert_eq!(
            errors.get(Field::Country),
            Some("Please enter a valid country name")
        );
        assert_eq!(
            errors.get(Field::Province),
            Some("Please enter a valid province name")
        );
        assert_eq!(
            errors.get(Field::HomeAddress),
            Some("Please enter a more detailed address")
        );
    }

    #[test]
    fn phone_punctuation_is_ignored() {
        let form = CheckoutForm {
            phone: "(555) 123-4567".to_string(),
            ..valid_form()
        };

        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn form_errors_display_in_field_order() {
        let form = CheckoutForm {
            name: String::new(),
            home_address: String::new(),
            ..valid_form()
        };

        let errors = form.validate().err().unwrap_or_default();

        assert_eq!(
            errors.to_string(),
            "name: Name is required; home address: Home address is required"
        );
    }

    #[test]
    fn order_numbers_have_six_digits() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let number = OrderNumber::generate(&mut rng);
            let digits = number.as_str().strip_prefix("ORD-").unwrap_or_default();

            assert_eq!(digits.len(), 6, "unexpected order number {number}");
            assert!(digits.chars().all(|c| c.is_ascii_digit()));
            assert!(!digits.starts_with('0'));
        }
    }
}
