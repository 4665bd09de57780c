//! CLI command implementations.

pub mod cart;
pub mod config;
pub mod products;
pub mod summary;

use checkout_commerce::summary::QUANTITY_CHOICES;
use clap::{Args, Subcommand};
use thiserror::Error;

/// Message shown when a quantity cannot be accepted.
pub const INVALID_QUANTITY_MESSAGE: &str = "Please enter a valid quantity.";

/// Rejected user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// Not a whole number, or not positive.
    #[error("Please enter a valid quantity. Got {0:?}")]
    InvalidQuantity(String),

    /// Outside what the quantity selector offers.
    #[error("Quantity must be between {min} and {max}, got {got}")]
    OutOfRange { got: i64, min: i64, max: i64 },
}

/// Parse a quantity typed by the user: a positive whole number.
pub fn parse_quantity(input: &str) -> Result<i64, InputError> {
    match input.trim().parse::<i64>() {
        Ok(quantity) if quantity > 0 => Ok(quantity),
        _ => Err(InputError::InvalidQuantity(input.to_string())),
    }
}

/// Parse a quantity picked from the add-to-cart selector.
pub fn parse_selector_quantity(input: &str) -> Result<i64, InputError> {
    let quantity = parse_quantity(input)?;
    if !QUANTITY_CHOICES.contains(&quantity) {
        return Err(InputError::OutOfRange {
            got: quantity,
            min: *QUANTITY_CHOICES.start(),
            max: *QUANTITY_CHOICES.end(),
        });
    }
    Ok(quantity)
}

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product ID.
    pub product_id: String,

    /// Quantity to add (1-10).
    #[arg(short, long, default_value = "1")]
    pub quantity: String,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Product ID.
    pub product_id: String,
}

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// Product ID.
    pub product_id: String,

    /// New quantity. Prompted for when omitted.
    pub quantity: Option<String>,
}

/// Arguments for the delivery command.
#[derive(Args)]
pub struct DeliveryArgs {
    /// Product ID.
    pub product_id: String,

    /// Delivery option ID.
    pub option_id: String,
}

/// Arguments for the clear command.
#[derive(Args)]
pub struct ClearArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,
    /// Write a default checkout.toml in the current directory.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}
