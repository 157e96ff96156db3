use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use brdoc_address::{Address, AddressError, Cep, CepProvider, CepResolver, ProviderError, Uf};

fn paulista() -> Address {
    Address {
        uf: Uf::Sp,
        cep: Cep::parse("01310930").unwrap(),
        localidade: "São Paulo".to_string(),
        logradouro: "Avenida Paulista".to_string(),
        complemento: String::new(),
        bairro: "Bela Vista".to_string(),
        unidade: String::new(),
    }
}

enum Answer {
    Found,
    NotFound,
    Fail,
}

struct FakeProvider {
    name: &'static str,
    answer: Answer,
    calls: Arc<AtomicUsize>,
}

impl FakeProvider {
    fn boxed(name: &'static str, answer: Answer, calls: &Arc<AtomicUsize>) -> Box<dyn CepProvider> {
        Box::new(Self {
            name,
            answer,
            calls: Arc::clone(calls),
        })
    }
}

#[async_trait]
impl CepProvider for FakeProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn lookup(&self, _cep: &Cep) -> Result<Option<Address>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.answer {
            Answer::Found => Ok(Some(paulista())),
            Answer::NotFound => Ok(None),
            Answer::Fail => Err(ProviderError::new(self.name, "connection refused")),
        }
    }
}

#[tokio::test]
async fn first_provider_answer_wins() {
    let primary_calls = Arc::new(AtomicUsize::new(0));
    let fallback_calls = Arc::new(AtomicUsize::new(0));
    let resolver = CepResolver::with_providers(
        vec![
            FakeProvider::boxed("primary", Answer::Found, &primary_calls),
            FakeProvider::boxed("fallback", Answer::Found, &fallback_calls),
        ],
        Duration::from_secs(60),
    );

    let cep = Cep::parse("01310930").unwrap();
    let address = resolver.resolve(&cep).await.unwrap();
    assert_eq!(address, paulista());
    assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
    assert_eq!(fallback_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn transport_failures_fall_through_to_the_next_provider() {
    let primary_calls = Arc::new(AtomicUsize::new(0));
    let fallback_calls = Arc::new(AtomicUsize::new(0));
    let resolver = CepResolver::with_providers(
        vec![
            FakeProvider::boxed("primary", Answer::Fail, &primary_calls),
            FakeProvider::boxed("fallback", Answer::Found, &fallback_calls),
        ],
        Duration::from_secs(60),
    );

    let cep = Cep::parse("01310930").unwrap();
    let address = resolver.resolve(&cep).await.unwrap();
    assert_eq!(address, paulista());
    assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
    assert_eq!(fallback_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn a_definitive_not_found_stops_the_chain() {
    let primary_calls = Arc::new(AtomicUsize::new(0));
    let fallback_calls = Arc::new(AtomicUsize::new(0));
    let resolver = CepResolver::with_providers(
        vec![
            FakeProvider::boxed("primary", Answer::NotFound, &primary_calls),
            FakeProvider::boxed("fallback", Answer::Found, &fallback_calls),
        ],
        Duration::from_secs(60),
    );

    let cep = Cep::parse("99999999").unwrap();
    let err = resolver.resolve(&cep).await.unwrap_err();
    assert!(matches!(err, AddressError::NotFound { .. }));
    assert_eq!(fallback_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn when_every_provider_fails_the_errors_surface_together() {
    let calls = Arc::new(AtomicUsize::new(0));
    let resolver = CepResolver::with_providers(
        vec![
            FakeProvider::boxed("primary", Answer::Fail, &calls),
            FakeProvider::boxed("fallback", Answer::Fail, &calls),
        ],
        Duration::from_secs(60),
    );

    let cep = Cep::parse("01310930").unwrap();
    let err = resolver.resolve(&cep).await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("primary"), "message: {message}");
    assert!(message.contains("fallback"), "message: {message}");
}

#[tokio::test]
async fn resolved_addresses_are_cached_within_the_ttl() {
    let calls = Arc::new(AtomicUsize::new(0));
    let resolver = CepResolver::with_providers(
        vec![FakeProvider::boxed("primary", Answer::Found, &calls)],
        Duration::from_secs(60),
    );

    let cep = Cep::parse("01310930").unwrap();
    resolver.resolve(&cep).await.unwrap();
    resolver.resolve(&cep).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn not_found_answers_are_negatively_cached() {
    let calls = Arc::new(AtomicUsize::new(0));
    let resolver = CepResolver::with_providers(
        vec![FakeProvider::boxed("primary", Answer::NotFound, &calls)],
        Duration::from_secs(60),
    );

    let cep = Cep::parse("99999999").unwrap();
    assert!(resolver.resolve(&cep).await.is_err());
    assert!(resolver.resolve(&cep).await.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn expired_entries_are_looked_up_again() {
    let calls = Arc::new(AtomicUsize::new(0));
    let resolver = CepResolver::with_providers(
        vec![FakeProvider::boxed("primary", Answer::Found, &calls)],
        Duration::ZERO,
    );

    let cep = Cep::parse("01310930").unwrap();
    resolver.resolve(&cep).await.unwrap();
    resolver.resolve(&cep).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn provider_failures_are_never_cached() {
    let calls = Arc::new(AtomicUsize::new(0));
    let resolver = CepResolver::with_providers(
        vec![FakeProvider::boxed("primary", Answer::Fail, &calls)],
        Duration::from_secs(60),
    );

    let cep = Cep::parse("01310930").unwrap();
    assert!(resolver.resolve(&cep).await.is_err());
    assert!(resolver.resolve(&cep).await.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
