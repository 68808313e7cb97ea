//! Input validation helpers
//!
//! Small, dependency-free checks used by the backend services before any
//! write is accepted. Each returns a static message suitable for the 400
//! validation envelope.

/// Validate email format (basic check).
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate password strength.
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

/// Validate a stock-keeping code: 1-32 characters, no whitespace.
pub fn validate_sku(sku: &str) -> Result<(), &'static str> {
    if sku.is_empty() {
        return Err("SKU must not be empty");
    }
    if sku.len() > 32 {
        return Err("SKU must be at most 32 characters");
    }
    if sku.chars().any(|c| c.is_whitespace()) {
        return Err("SKU must not contain whitespace");
    }
    Ok(())
}

/// Validate an operational quantity (receipts, deliveries, transfers).
pub fn validate_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Quantity must be positive");
    }
    Ok(())
}

/// Validate a counted stock level from a physical count.
pub fn validate_counted_quantity(counted: i32) -> Result<(), &'static str> {
    if counted < 0 {
        return Err("Counted quantity cannot be negative");
    }
    Ok(())
}

/// Validate a free-text field that must carry a value (customer, supplier,
/// location, reason).
pub fn validate_required_text(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err("Field must not be empty");
    }
    Ok(())
}
