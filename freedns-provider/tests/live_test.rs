//! Live integration tests against the real freedns.afraid.org console.
//!
//! Run with:
//! ```bash
//! FREEDNS_USERNAME=xxx FREEDNS_PASSWORD=xxx FREEDNS_DOMAIN=example.com \
//!     cargo test -p freedns-provider --test live_test -- --ignored --nocapture --test-threads=1
//! ```

use freedns_provider::{
    Credentials, Error, FreednsClient, NewRecord, RecordType, registrable_domain,
};

/// Skip the test (with a message) when a required env var is missing.
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping test: missing env var {}", $var);
                return;
            }
        )+
    };
}

fn credentials_from_env() -> Credentials {
    Credentials {
        username: std::env::var("FREEDNS_USERNAME").unwrap_or_default(),
        password: std::env::var("FREEDNS_PASSWORD").unwrap_or_default(),
    }
}

/// A unique quoted TXT payload so concurrent runs cannot collide.
fn unique_txt_value() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("\"freedns-provider-test-{}\"", &uuid.to_string()[..8])
}

#[tokio::test]
#[ignore = "integration test: requires FREEDNS_USERNAME, FREEDNS_PASSWORD and FREEDNS_DOMAIN"]
async fn full_record_lifecycle() {
    skip_if_no_credentials!("FREEDNS_USERNAME", "FREEDNS_PASSWORD", "FREEDNS_DOMAIN");

    let domain = registrable_domain(&std::env::var("FREEDNS_DOMAIN").unwrap_or_default());
    let value = unique_txt_value();
    let mut client = FreednsClient::new();

    // 1. login + domain selection
    client
        .login(&credentials_from_env())
        .await
        .expect("login failed");
    assert!(client.is_authenticated());
    client
        .select_domain(&domain)
        .await
        .expect("select_domain failed");
    println!("✓ logged in, domain id {:?}", client.domain_id());

    // 2. create an apex TXT record
    let record = NewRecord {
        record_type: RecordType::Txt,
        subdomain: String::new(),
        address: value.clone(),
        wildcard: false,
        ttl: None,
    };
    let outcome = client.add_record(&record).await.expect("add_record failed");
    println!("✓ add_record: {outcome:?}");

    // 3. adding the identical record again must stay a success
    let second = client
        .add_record(&record)
        .await
        .expect("second add_record must not fail");
    println!("✓ idempotent add_record: {second:?}");

    // 4. find it (the apex shows up under the full domain name)
    let found = client
        .find_record(&domain, RecordType::Txt, &value)
        .await
        .expect("find_record failed");
    assert!(!found.id.is_empty());
    println!("✓ find_record: id={}", found.id);

    // 5. delete and log out
    client
        .delete_record(&found.id)
        .await
        .expect("delete_record failed");
    println!("✓ delete_record");

    client.logout().await.expect("logout failed");
    assert!(!client.is_authenticated());
    println!("✓ logout");
}

#[tokio::test]
#[ignore = "integration test: requires FREEDNS_USERNAME, FREEDNS_PASSWORD and FREEDNS_DOMAIN"]
async fn bad_password_is_rejected() {
    skip_if_no_credentials!("FREEDNS_USERNAME", "FREEDNS_PASSWORD", "FREEDNS_DOMAIN");

    let mut client = FreednsClient::new();
    let result = client
        .login(&Credentials {
            username: std::env::var("FREEDNS_USERNAME").unwrap_or_default(),
            password: format!("wrong-{}", uuid::Uuid::new_v4()),
        })
        .await;

    assert!(
        matches!(result, Err(Error::InvalidCredentials)),
        "unexpected login result: {result:?}"
    );
    assert!(!client.is_authenticated());
    println!("✓ invalid credentials rejected");
}

#[tokio::test]
#[ignore = "integration test: requires FREEDNS_USERNAME, FREEDNS_PASSWORD and FREEDNS_DOMAIN"]
async fn unknown_domain_is_reported() {
    skip_if_no_credentials!("FREEDNS_USERNAME", "FREEDNS_PASSWORD", "FREEDNS_DOMAIN");

    let mut client = FreednsClient::new();
    client
        .login(&credentials_from_env())
        .await
        .expect("login failed");

    let bogus = format!("nope-{}.example", &uuid::Uuid::new_v4().to_string()[..8]);
    let result = client.select_domain(&bogus).await;
    assert!(
        matches!(result, Err(Error::DomainNotFound { ref domain }) if *domain == bogus),
        "unexpected select_domain result: {result:?}"
    );

    client.logout().await.expect("logout failed");
    println!("✓ unknown domain reported");
}
