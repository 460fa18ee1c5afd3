//! Demo driver.
//!
//! Generates a plausible random customer, stores it, lists everything, then
//! fetches one stored customer chosen at random.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::storage::{Customer, CustomerRepository, FullName, StorageError};

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Claude", "Dennis", "Donald", "Edsger", "Frances", "Grace", "John",
    "Ken", "Leslie", "Linus", "Margaret", "Niklaus", "Radia", "Tony", "Vint",
];

const LAST_NAMES: &[&str] = &[
    "Allen", "Backus", "Dijkstra", "Hamilton", "Hoare", "Hopper", "Knuth", "Lamport", "Liskov",
    "Lovelace", "Perlman", "Ritchie", "Shannon", "Thompson", "Turing", "Wirth",
];

const EMAIL_DOMAINS: &[&str] = &["example.com", "example.org", "example.net"];

const PASSWORD_CHARS: &[u8] =
    b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz23456789!@#$%^&*";

/// Outcome of one demo run.
#[derive(Debug, Clone)]
pub struct DemoReport {
    /// The generated customer.
    pub generated: Customer,
    /// Whether the insert affected exactly one row.
    pub inserted: bool,
    /// Number of customers listed after the insert.
    pub total: usize,
    /// The randomly picked customer, fetched by account number.
    pub picked: Option<Customer>,
}

/// Build a random, valid customer.
pub fn random_customer<R: Rng + ?Sized>(rng: &mut R) -> Customer {
    let first = pick(rng, FIRST_NAMES);
    let middle = pick(rng, FIRST_NAMES);
    let last = pick(rng, LAST_NAMES);

    let email = format!(
        "{}.{}{}@{}",
        first.to_lowercase(),
        last.to_lowercase(),
        rng.gen_range(1..10_000),
        pick(rng, EMAIL_DOMAINS)
    );

    let password_len = rng.gen_range(8..=10);
    let password: String = (0..password_len)
        .map(|_| char::from(PASSWORD_CHARS[rng.gen_range(0..PASSWORD_CHARS.len())]))
        .collect();

    Customer::new(
        rng.gen_range(1_000_000_000..=9_999_999_999),
        FullName::new(first, Some(middle), last),
        email,
        password,
        rng.gen_range(1_000_000_000..=9_999_999_999),
    )
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

/// Insert a random customer, list all customers, and fetch one at random.
///
/// `picked` is `None` only when the listing comes back empty.
pub async fn run_demo<S, R>(store: &S, rng: &mut R) -> Result<DemoReport, StorageError>
where
    S: CustomerRepository + ?Sized,
    R: Rng + ?Sized,
{
    let generated = random_customer(rng);
    tracing::info!(account_no = generated.account_no, "Adding demo customer");
    let inserted = store.create(&generated).await?;

    let all = store.get_all().await?;
    let picked = match all.choose(rng) {
        Some(candidate) => Some(store.get_by_id(candidate.account_no).await?),
        None => {
            tracing::warn!("No customers found; skipping random selection");
            None
        }
    };

    Ok(DemoReport {
        generated,
        inserted,
        total: all.len(),
        picked,
    })
}
