//! LootForge Shared - wire types for the REST boundary
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, uuid and chrono
//! 2. **No business logic** - Pure data types and serialization
//! 3. **No domain IDs** - use raw `uuid::Uuid` in DTOs

pub mod requests;
pub mod responses;

pub use requests::{
    AdventureRequest, CreatePrizeTypeRequest, CreateUserRequest, ForgeLootboxRequest,
    UserIdQuery,
};
pub use responses::{
    AdventureHistoryEntry, AdventureHistoryResponse, AdventureResponse, AwardedPrizeResponse,
    ErrorResponse, ForgeLootboxResponse, HealthResponse, MaterialsSummaryResponse,
    PrizeTypeResponse, UserResponse,
};

// Rarity is part of the wire vocabulary
pub use lootforge_domain::Rarity;
