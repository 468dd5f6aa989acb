//! Schedule-provider access: relay client, alias field mapping, team
//! identifier extraction, and the [`FixtureProvider`] trait.

pub mod error;
pub mod fields;
pub mod provider;
pub mod raw_fixture;
pub mod relay;
pub mod team_id;

pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use fields::{map_record, pick_string};
pub use provider::{BoxFuture, ErrorProvider, FixtureProvider, FussballProvider, StaticProvider};
pub use raw_fixture::ProviderFixture;
pub use relay::{RelayClient, RelayConfig, TOKEN_HEADER};
pub use team_id::{TeamId, extract_team_id};
