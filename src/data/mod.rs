//! Core data models for the Pokédex
//!
//! This module contains the Pokémon record shared by the catalog client, the
//! cache, and the application state, together with the API clients that
//! produce it.

pub mod pokeapi;
pub mod sounds;
pub mod transport;

pub use pokeapi::{map_pokemon_data, CatalogClient, CatalogError, PokeApiClient};
pub use sounds::SoundClient;
pub use transport::{HttpResponse, ReqwestTransport, Transport};

use serde::{Deserialize, Serialize};

/// Entry of the paginated listing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub name: String,
    pub url: String,
}

/// Canonical Pokémon record
///
/// Records start life as listing summaries (name and url only) and gain the
/// remaining fields when detail payloads are merged in. Detail payloads from
/// the API carry no `url`, so every field but `name` is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<TypeSlot>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprites: Option<Sprites>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cries: Option<Cries>,
}

/// One entry of a Pokémon's type list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

/// A `{name, url}` reference to another API resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// Image URLs for a Pokémon
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherSprites {
    #[serde(default, rename = "official-artwork")]
    pub official_artwork: Option<Artwork>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub front_shiny: Option<String>,
}

/// Cry sound URLs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cries {
    #[serde(default)]
    pub latest: Option<String>,
    #[serde(default)]
    pub legacy: Option<String>,
}

impl From<PokemonSummary> for Pokemon {
    fn from(summary: PokemonSummary) -> Self {
        Self {
            name: summary.name,
            url: Some(summary.url),
            ..Self::default()
        }
    }
}

impl Pokemon {
    /// Shallow-merges `newer` over this record
    ///
    /// Fields present in `newer` replace the current value wholesale (nested
    /// structures such as `sprites` included); absent fields keep the current
    /// value. An empty name never overwrites a known one.
    pub fn merge_from(&mut self, newer: Pokemon) {
        if !newer.name.is_empty() {
            self.name = newer.name;
        }
        if newer.url.is_some() {
            self.url = newer.url;
        }
        if newer.id.is_some() {
            self.id = newer.id;
        }
        if newer.height.is_some() {
            self.height = newer.height;
        }
        if newer.weight.is_some() {
            self.weight = newer.weight;
        }
        if newer.types.is_some() {
            self.types = newer.types;
        }
        if newer.sprites.is_some() {
            self.sprites = newer.sprites;
        }
        if newer.cries.is_some() {
            self.cries = newer.cries;
        }
    }

    /// Official artwork URL, falling back to the default front sprite
    pub fn artwork_url(&self) -> Option<&str> {
        let sprites = self.sprites.as_ref()?;
        sprites
            .other
            .as_ref()
            .and_then(|other| other.official_artwork.as_ref())
            .and_then(|art| art.front_default.as_deref())
            .or(sprites.front_default.as_deref())
    }

    /// Type names in slot order
    pub fn type_names(&self) -> Vec<&str> {
        let mut slots: Vec<&TypeSlot> = self.types.iter().flatten().collect();
        slots.sort_by_key(|t| t.slot);
        slots.into_iter().map(|t| t.kind.name.as_str()).collect()
    }
}

/// Lower-cases and trims a Pokémon name for use as a lookup key
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprites(front: &str) -> Sprites {
        Sprites {
            front_default: Some(front.to_string()),
            other: None,
        }
    }

    #[test]
    fn test_summary_converts_to_bare_record() {
        let pokemon = Pokemon::from(PokemonSummary {
            name: "pikachu".to_string(),
            url: "https://pokeapi.co/api/v2/pokemon/25/".to_string(),
        });

        assert_eq!(pokemon.name, "pikachu");
        assert_eq!(pokemon.url.as_deref(), Some("https://pokeapi.co/api/v2/pokemon/25/"));
        assert!(pokemon.id.is_none());
        assert!(pokemon.sprites.is_none());
    }

    #[test]
    fn test_merge_keeps_fields_absent_from_newer() {
        let mut existing = Pokemon {
            name: "pikachu".to_string(),
            url: Some("url1".to_string()),
            ..Pokemon::default()
        };
        let newer = Pokemon {
            name: "pikachu".to_string(),
            id: Some(25),
            height: Some(4),
            weight: Some(60),
            ..Pokemon::default()
        };

        existing.merge_from(newer);

        assert_eq!(existing.url.as_deref(), Some("url1"));
        assert_eq!(existing.id, Some(25));
        assert_eq!(existing.height, Some(4));
        assert_eq!(existing.weight, Some(60));
    }

    #[test]
    fn test_merge_replaces_nested_sprites_wholesale() {
        let mut existing = Pokemon {
            name: "eevee".to_string(),
            sprites: Some(Sprites {
                front_default: Some("old.png".to_string()),
                other: Some(OtherSprites {
                    official_artwork: Some(Artwork {
                        front_default: Some("art.png".to_string()),
                        front_shiny: None,
                    }),
                }),
            }),
            ..Pokemon::default()
        };

        existing.merge_from(Pokemon {
            sprites: Some(sprites("new.png")),
            ..Pokemon::default()
        });

        assert_eq!(existing.sprites, Some(sprites("new.png")));
        assert_eq!(existing.name, "eevee", "Empty name must not overwrite");
    }

    #[test]
    fn test_artwork_url_prefers_official_artwork() {
        let pokemon = Pokemon {
            sprites: Some(Sprites {
                front_default: Some("front.png".to_string()),
                other: Some(OtherSprites {
                    official_artwork: Some(Artwork {
                        front_default: Some("art.png".to_string()),
                        front_shiny: Some("shiny.png".to_string()),
                    }),
                }),
            }),
            ..Pokemon::default()
        };

        assert_eq!(pokemon.artwork_url(), Some("art.png"));
    }

    #[test]
    fn test_artwork_url_falls_back_to_front_default() {
        let pokemon = Pokemon {
            sprites: Some(sprites("front.png")),
            ..Pokemon::default()
        };

        assert_eq!(pokemon.artwork_url(), Some("front.png"));
        assert_eq!(Pokemon::default().artwork_url(), None);
    }

    #[test]
    fn test_type_names_follow_slot_order() {
        let resource = |name: &str| NamedResource {
            name: name.to_string(),
            url: format!("https://pokeapi.co/api/v2/type/{}/", name),
        };
        let pokemon = Pokemon {
            types: Some(vec![
                TypeSlot { slot: 2, kind: resource("poison") },
                TypeSlot { slot: 1, kind: resource("grass") },
            ]),
            ..Pokemon::default()
        };

        assert_eq!(pokemon.type_names(), vec!["grass", "poison"]);
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Pikachu "), "pikachu");
        assert_eq!(normalize_name("MR-MIME"), "mr-mime");
    }

    #[test]
    fn test_record_serialization_skips_absent_fields() {
        let pokemon = Pokemon {
            name: "ditto".to_string(),
            id: Some(132),
            ..Pokemon::default()
        };

        let json = serde_json::to_value(&pokemon).unwrap();

        assert_eq!(json, serde_json::json!({"name": "ditto", "id": 132}));
    }
}
