//! In-memory mock implementations for repository and provider ports, plus
//! factories and an `AppState` builder for HTTP-level tests.

mod app_state_builder;
mod factories;
mod mocks;

pub use app_state_builder::{TEST_ADMIN_KEY, TestAppStateBuilder, TestHandles};
pub use factories::create_test_tenant;
pub use mocks::{
    FailingPaymentProvider, InMemoryPromoCodeRepo, InMemoryTenantRepo, InMemoryTestimonialRepo,
    StubPaymentProvider,
};
