//! Input validation, applied at the boundary before any store call.

use crate::error::ApiError;
use crate::services::items::{CreateItemInput, UpdateItemInput};
use crate::services::list_items::{CreateListItemInput, UpdateListItemInput};
use crate::services::lists::{CreateListInput, UpdateListInput};
use crate::services::users::{SignupInput, UpdateUserInput};

const MIN_PASSWORD_LENGTH: usize = 6;
const MAX_NAME_LENGTH: usize = 200;

pub fn email(value: &str) -> Result<(), ApiError> {
    let parts: Vec<&str> = value.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() || !parts[1].contains('.') {
        return Err(ApiError::field_error("email", "Invalid email format"));
    }
    Ok(())
}

pub fn password(value: &str) -> Result<(), ApiError> {
    if value.len() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::field_error(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH),
        ));
    }
    Ok(())
}

pub fn name(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::field_error(field, "Must not be empty"));
    }
    if value.len() > MAX_NAME_LENGTH {
        return Err(ApiError::field_error(
            field,
            format!("Must be at most {} characters", MAX_NAME_LENGTH),
        ));
    }
    Ok(())
}

pub fn quantity(value: i32) -> Result<(), ApiError> {
    if value < 0 {
        return Err(ApiError::field_error("quantity", "Must not be negative"));
    }
    Ok(())
}

pub fn signup_input(input: &SignupInput) -> Result<(), ApiError> {
    email(&input.email)?;
    password(&input.password)?;
    name("fullName", &input.full_name)
}

pub fn update_user_input(input: &UpdateUserInput) -> Result<(), ApiError> {
    if let Some(value) = &input.email {
        email(value)?;
    }
    if let Some(value) = &input.password {
        password(value)?;
    }
    if let Some(value) = &input.full_name {
        name("fullName", value)?;
    }
    // Roles lists are never empty-as-null; an empty list would lock the
    // user out of every role-gated operation unintentionally.
    if let Some(roles) = &input.roles {
        if roles.is_empty() {
            return Err(ApiError::field_error("roles", "Must not be empty"));
        }
    }
    Ok(())
}

pub fn create_item_input(input: &CreateItemInput) -> Result<(), ApiError> {
    name("name", &input.name)
}

pub fn update_item_input(input: &UpdateItemInput) -> Result<(), ApiError> {
    if let Some(value) = &input.name {
        name("name", value)?;
    }
    Ok(())
}

pub fn create_list_input(input: &CreateListInput) -> Result<(), ApiError> {
    name("name", &input.name)
}

pub fn update_list_input(input: &UpdateListInput) -> Result<(), ApiError> {
    if let Some(value) = &input.name {
        name("name", value)?;
    }
    Ok(())
}

pub fn create_list_item_input(input: &CreateListItemInput) -> Result<(), ApiError> {
    quantity(input.quantity)
}

pub fn update_list_item_input(input: &UpdateListItemInput) -> Result<(), ApiError> {
    if let Some(value) = input.quantity {
        quantity(value)?;
    }
    Ok(())
}
