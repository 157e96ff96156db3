use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::address::Address;
use crate::cep::Cep;
use crate::error::AddressError;
use crate::uf::Uf;

/// How long resolved addresses and definitive not-found answers stay
/// cached.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(2 * 60 * 60);

/// A single upstream answering CEP lookups.
///
/// `Ok(None)` is a definitive "no address registered for this CEP" and
/// stops the fallback chain; `Err` is a transport or decoding failure and
/// lets the next provider try.
#[async_trait]
pub trait CepProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn lookup(&self, cep: &Cep) -> Result<Option<Address>, ProviderError>;
}

/// Failure of one provider in the chain.
#[derive(Debug, Error)]
#[error("{provider}: {message}")]
pub struct ProviderError {
    provider: &'static str,
    message: String,
}

impl ProviderError {
    pub fn new(provider: &'static str, message: impl Into<String>) -> Self {
        Self {
            provider,
            message: message.into(),
        }
    }
}

enum CacheSlot {
    Found(Address),
    NotFound,
}

struct CacheEntry {
    stored_at: Instant,
    slot: CacheSlot,
}

/// Resolves CEP codes into [`Address`] records through a provider
/// fallback chain, caching every definitive answer.
pub struct CepResolver {
    providers: Vec<Box<dyn CepProvider>>,
    cache: Mutex<HashMap<Cep, CacheEntry>>,
    ttl: Duration,
}

impl CepResolver {
    /// A resolver over the public ViaCEP and BrasilAPI services with the
    /// default cache TTL.
    pub fn new() -> Self {
        let client = reqwest::Client::new();
        Self::with_providers(
            vec![
                Box::new(ViaCepProvider::new(client.clone())),
                Box::new(BrasilApiProvider::new(client)),
            ],
            DEFAULT_CACHE_TTL,
        )
    }

    /// A resolver over an explicit provider chain, tried in order.
    pub fn with_providers(providers: Vec<Box<dyn CepProvider>>, ttl: Duration) -> Self {
        Self {
            providers,
            cache: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Resolve `cep`, consulting the cache first and otherwise walking
    /// the provider chain.
    pub async fn resolve(&self, cep: &Cep) -> Result<Address, AddressError> {
        if let Some(answer) = self.cached(cep) {
            debug!(cep = %cep, "cep cache hit");
            return answer;
        }

        let mut failures = Vec::new();
        for provider in &self.providers {
            match provider.lookup(cep).await {
                Ok(Some(address)) => {
                    debug!(cep = %cep, provider = provider.name(), "cep resolved");
                    self.store(*cep, CacheSlot::Found(address.clone()));
                    return Ok(address);
                }
                Ok(None) => {
                    debug!(cep = %cep, provider = provider.name(), "cep not registered");
                    self.store(*cep, CacheSlot::NotFound);
                    return Err(self.not_found(cep));
                }
                Err(err) => {
                    warn!(cep = %cep, provider = provider.name(), error = %err, "cep provider failed");
                    failures.push(err.to_string());
                }
            }
        }

        Err(AddressError::Lookup(failures.join("; ")))
    }

    fn cached(&self, cep: &Cep) -> Option<Result<Address, AddressError>> {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        match cache.get(cep) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => match &entry.slot {
                CacheSlot::Found(address) => Some(Ok(address.clone())),
                CacheSlot::NotFound => Some(Err(self.not_found(cep))),
            },
            Some(_) => {
                cache.remove(cep);
                None
            }
            None => None,
        }
    }

    fn store(&self, cep: Cep, slot: CacheSlot) {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.insert(
            cep,
            CacheEntry {
                stored_at: Instant::now(),
                slot,
            },
        );
    }

    fn not_found(&self, cep: &Cep) -> AddressError {
        AddressError::NotFound {
            cep: cep.formatted(),
        }
    }
}

impl Default for CepResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// `https://viacep.com.br` lookup.
pub struct ViaCepProvider {
    client: reqwest::Client,
}

impl ViaCepProvider {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[derive(Deserialize)]
struct ViaCepPayload {
    #[serde(default)]
    erro: bool,
    #[serde(default)]
    cep: String,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    complemento: String,
    #[serde(default)]
    unidade: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
}

#[async_trait]
impl CepProvider for ViaCepProvider {
    fn name(&self) -> &'static str {
        "viacep"
    }

    async fn lookup(&self, cep: &Cep) -> Result<Option<Address>, ProviderError> {
        let url = format!("https://viacep.com.br/ws/{}/json/", cep.as_compact());
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| ProviderError::new(self.name(), err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::new(
                self.name(),
                format!("unexpected status {status}"),
            ));
        }

        let payload: ViaCepPayload = response
            .json()
            .await
            .map_err(|err| ProviderError::new(self.name(), err.to_string()))?;
        if payload.erro || payload.cep.is_empty() {
            return Ok(None);
        }

        let uf: Uf = payload
            .uf
            .parse()
            .map_err(|_| ProviderError::new(self.name(), format!("unknown uf: {}", payload.uf)))?;
        let cep = Cep::parse(&payload.cep)
            .map_err(|_| ProviderError::new(self.name(), format!("bad cep echo: {}", payload.cep)))?;

        Ok(Some(Address {
            uf,
            cep,
            localidade: payload.localidade,
            logradouro: payload.logradouro,
            complemento: payload.complemento,
            bairro: payload.bairro,
            unidade: payload.unidade,
        }))
    }
}

/// `https://brasilapi.com.br` lookup.
pub struct BrasilApiProvider {
    client: reqwest::Client,
}

impl BrasilApiProvider {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[derive(Deserialize)]
struct BrasilApiPayload {
    cep: String,
    state: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    neighborhood: String,
    #[serde(default)]
    street: String,
}

#[async_trait]
impl CepProvider for BrasilApiProvider {
    fn name(&self) -> &'static str {
        "brasilapi"
    }

    async fn lookup(&self, cep: &Cep) -> Result<Option<Address>, ProviderError> {
        let url = format!("https://brasilapi.com.br/api/cep/v1/{}", cep.as_compact());
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| ProviderError::new(self.name(), err.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ProviderError::new(
                self.name(),
                format!("unexpected status {status}"),
            ));
        }

        let payload: BrasilApiPayload = response
            .json()
            .await
            .map_err(|err| ProviderError::new(self.name(), err.to_string()))?;

        let uf: Uf = payload
            .state
            .parse()
            .map_err(|_| ProviderError::new(self.name(), format!("unknown uf: {}", payload.state)))?;
        let cep = Cep::parse(&payload.cep)
            .map_err(|_| ProviderError::new(self.name(), format!("bad cep echo: {}", payload.cep)))?;

        Ok(Some(Address {
            uf,
            cep,
            localidade: payload.city,
            logradouro: payload.street,
            complemento: String::new(),
            bairro: payload.neighborhood,
            unidade: String::new(),
        }))
    }
}
