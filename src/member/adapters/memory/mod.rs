//! In-memory member adapters.

mod member;

pub use member::InMemoryMemberRepository;
