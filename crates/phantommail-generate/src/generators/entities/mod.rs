//! Generators for the structured entities attached to order and customs
//! emails.

mod address;
mod declaration;
mod goods;
mod transport;

pub use address::{generate_address, generate_client, generate_stops};
pub use declaration::{CustomsDeclarationGenerator, generate_customs_declaration};
pub use goods::generate_goods;
pub use transport::{
    DELIVERY_LOCALE, MAX_INTERMEDIATE_STOPS, PICKUP_LOCALES, TransportOrderGenerator,
    generate_transport_order,
};

use crate::generators::GeneratorRegistry;

pub(crate) fn register(registry: &mut GeneratorRegistry) {
    registry.register_generator(Box::new(TransportOrderGenerator));
    registry.register_generator(Box::new(CustomsDeclarationGenerator));
}
