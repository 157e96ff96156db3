use serde::{Deserialize, Serialize};

use crate::cep::Cep;
use crate::error::AddressError;
use crate::uf::Uf;

/// A structured address record associated with a CEP.
///
/// Field names follow the provider payloads (and Brazilian postal
/// terminology): `localidade` is the city, `logradouro` the street,
/// `bairro` the district.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub uf: Uf,
    pub cep: Cep,
    #[serde(default)]
    pub localidade: String,
    #[serde(default)]
    pub logradouro: String,
    #[serde(default)]
    pub complemento: String,
    #[serde(default)]
    pub bairro: String,
    #[serde(default)]
    pub unidade: String,
}

/// Number of fields in the flat `;`-separated representation.
const FLAT_FIELDS: usize = 7;

impl Address {
    /// Encode into a single `;`-joined line, suitable for flat storage.
    ///
    /// The field order is `uf;localidade;logradouro;complemento;bairro;unidade;cep`.
    pub fn encode_flat(&self) -> String {
        let mut out = String::with_capacity(
            2 + self.localidade.len()
                + self.logradouro.len()
                + self.complemento.len()
                + self.bairro.len()
                + self.unidade.len()
                + Cep::FORMATTED_LEN
                + FLAT_FIELDS,
        );
        out.push_str(self.uf.abbreviation());
        out.push(';');
        out.push_str(&self.localidade);
        out.push(';');
        out.push_str(&self.logradouro);
        out.push(';');
        out.push_str(&self.complemento);
        out.push(';');
        out.push_str(&self.bairro);
        out.push(';');
        out.push_str(&self.unidade);
        out.push(';');
        out.push_str(&self.cep.formatted());
        out
    }

    /// Decode the flat representation produced by [`Address::encode_flat`].
    pub fn decode_flat(input: &str) -> Result<Self, AddressError> {
        let parts: Vec<&str> = input.split(';').collect();
        if parts.len() != FLAT_FIELDS {
            return Err(AddressError::InvalidSerializedAddress(format!(
                "expected {FLAT_FIELDS} fields, got {}",
                parts.len()
            )));
        }

        let uf: Uf = parts[0]
            .parse()
            .map_err(|_| AddressError::InvalidSerializedAddress(format!("unknown uf: {}", parts[0])))?;
        let cep = Cep::parse(parts[6])
            .map_err(|_| AddressError::InvalidSerializedAddress(format!("invalid cep: {}", parts[6])))?;

        Ok(Self {
            uf,
            cep,
            localidade: parts[1].to_string(),
            logradouro: parts[2].to_string(),
            complemento: parts[3].to_string(),
            bairro: parts[4].to_string(),
            unidade: parts[5].to_string(),
        })
    }
}
