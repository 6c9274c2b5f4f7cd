// Survey: static question catalogue, persona inference and career matching.
// All model calls go through llm_client, never the backend directly.

pub mod careers;
pub mod catalogue;
pub mod handlers;
pub mod persona;
pub mod prompts;
