use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the customer table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub company_name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub vat_number: String,
    pub phone: String,
    pub email: String,
}

/// A consignment of goods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goods {
    pub name: String,
    /// Number of packages, 1 to 100.
    pub quantity: u32,
    /// Gross weight in kilograms, 350 to 1000.
    pub weight: u32,
    /// Volume, 10 to 1000.
    pub volume: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub company: String,
    pub address: String,
    pub country: String,
}

/// Ordering party of a transport, derived from a customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub name: String,
    /// Contact person writing the email.
    pub sender_name: String,
    pub company: String,
    pub vat_number: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub email: String,
    pub phone: String,
}

impl Client {
    pub fn from_customer(customer: &CustomerRecord, sender_name: String) -> Self {
        Self {
            name: customer.company_name.clone(),
            sender_name,
            company: customer.company_name.clone(),
            vat_number: customer.vat_number.clone(),
            address: customer.address.clone(),
            city: customer.city.clone(),
            postal_code: customer.postal_code.clone(),
            country: customer.country.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportOrder {
    pub client: Client,
    pub goods: Goods,
    pub pickup_address: Address,
    pub delivery_address: Address,
    pub intermediate_loading_stops: Vec<Address>,
    pub intermediate_unloading_stops: Vec<Address>,
    pub loading_date: NaiveDate,
    pub unloading_date: NaiveDate,
}
