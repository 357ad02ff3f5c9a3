use crate::use_cases::tenant::{NewTenant, TenantProfile, TenantRepo};

use super::InMemoryTenantRepo;

/// Insert a locked tenant directly into the mock repo. The stored password
/// hash is a fixed opaque value; authentication tests go through signup.
pub async fn create_test_tenant(repo: &InMemoryTenantRepo, email: &str) -> TenantProfile {
    repo.insert_tenant(NewTenant {
        email,
        password_hash: "0000$0000",
        stripe_customer_id: "cus_test",
    })
    .await
    .expect("test tenant insert failed")
}
