//! Shared test schema: a small geography graph
//! (Continent -> countries -> Country -> cities -> City) with one
//! deliberately untranslatable type (Landmark).

use crate::{
    db::MemoryStore,
    key::RecordId,
    model::{EntityModel, FieldKind, FieldModel, RelationModel, TranslatableSpec},
    registry::EntityRegistry,
    traits::{EntityKind, EntityValue, Path, Related},
};

///
/// Models
///

pub(crate) const CONTINENT_MODEL: EntityModel = EntityModel {
    path: "test_fixtures::Continent",
    entity_name: "Continent",
    fields: &[
        FieldModel {
            name: "code",
            kind: FieldKind::Text,
        },
        FieldModel {
            name: "name",
            kind: FieldKind::Text,
        },
        FieldModel {
            name: "denonym",
            kind: FieldKind::Text,
        },
    ],
    relations: &[RelationModel {
        name: "countries",
        target: "Country",
        reverse_name: "continent",
        many: true,
    }],
    // `code` is text but stays untranslated.
    translatable: TranslatableSpec::Explicit(&["name", "denonym"]),
};

pub(crate) const COUNTRY_MODEL: EntityModel = EntityModel {
    path: "test_fixtures::Country",
    entity_name: "Country",
    fields: &[
        FieldModel {
            name: "code",
            kind: FieldKind::Enum,
        },
        FieldModel {
            name: "contact_email",
            kind: FieldKind::Email,
        },
        FieldModel {
            name: "name",
            kind: FieldKind::Text,
        },
        FieldModel {
            name: "denonym",
            kind: FieldKind::Text,
        },
    ],
    relations: &[
        RelationModel {
            name: "cities",
            target: "City",
            reverse_name: "country",
            many: true,
        },
        RelationModel {
            name: "capital",
            target: "City",
            reverse_name: "capital_of",
            many: false,
        },
        RelationModel {
            name: "landmarks",
            target: "Landmark",
            reverse_name: "country",
            many: true,
        },
    ],
    translatable: TranslatableSpec::Auto,
};

pub(crate) const CITY_MODEL: EntityModel = EntityModel {
    path: "test_fixtures::City",
    entity_name: "City",
    fields: &[
        FieldModel {
            name: "name",
            kind: FieldKind::Text,
        },
        FieldModel {
            name: "denonym",
            kind: FieldKind::Text,
        },
    ],
    relations: &[],
    translatable: TranslatableSpec::Auto,
};

pub(crate) const LANDMARK_MODEL: EntityModel = EntityModel {
    path: "test_fixtures::Landmark",
    entity_name: "Landmark",
    fields: &[FieldModel {
        name: "name",
        kind: FieldKind::Text,
    }],
    relations: &[],
    translatable: TranslatableSpec::NotTranslatable,
};

///
/// Entities
///

#[derive(Clone, Debug)]
pub(crate) struct Continent {
    pub id: u64,
    pub code: String,
    pub name: String,
    pub denonym: String,
    pub countries: Vec<Country>,
}

#[derive(Clone, Debug)]
pub(crate) struct Country {
    pub id: u64,
    pub code: String,
    pub contact_email: String,
    pub name: String,
    pub denonym: String,
    pub cities: Vec<City>,
    pub capital: Option<City>,
    pub landmarks: Vec<Landmark>,
}

#[derive(Clone, Debug)]
pub(crate) struct City {
    pub id: u64,
    pub name: String,
    pub denonym: String,
}

#[derive(Clone, Debug)]
pub(crate) struct Landmark {
    pub id: u64,
    pub name: String,
}

impl Path for Continent {
    const PATH: &'static str = "test_fixtures::Continent";
}

impl EntityKind for Continent {
    const MODEL: &'static EntityModel = &CONTINENT_MODEL;
}

impl EntityValue for Continent {
    fn model(&self) -> &'static EntityModel {
        Self::MODEL
    }

    fn record_id(&self) -> RecordId {
        self.id.into()
    }

    fn text_field(&self, field: &str) -> Option<String> {
        match field {
            "code" => Some(self.code.clone()),
            "name" => Some(self.name.clone()),
            "denonym" => Some(self.denonym.clone()),
            _ => None,
        }
    }

    fn set_text_field(&mut self, field: &str, value: &str) -> bool {
        match field {
            "code" => self.code = value.to_string(),
            "name" => self.name = value.to_string(),
            "denonym" => self.denonym = value.to_string(),
            _ => return false,
        }
        true
    }

    fn relation_mut(&mut self, relation: &str) -> Related<'_> {
        match relation {
            "countries" => Related::from_slice(&mut self.countries),
            _ => Related::None,
        }
    }
}

impl Path for Country {
    const PATH: &'static str = "test_fixtures::Country";
}

impl EntityKind for Country {
    const MODEL: &'static EntityModel = &COUNTRY_MODEL;
}

impl EntityValue for Country {
    fn model(&self) -> &'static EntityModel {
        Self::MODEL
    }

    fn record_id(&self) -> RecordId {
        self.id.into()
    }

    fn text_field(&self, field: &str) -> Option<String> {
        match field {
            "code" => Some(self.code.clone()),
            "contact_email" => Some(self.contact_email.clone()),
            "name" => Some(self.name.clone()),
            "denonym" => Some(self.denonym.clone()),
            _ => None,
        }
    }

    fn set_text_field(&mut self, field: &str, value: &str) -> bool {
        match field {
            "code" => self.code = value.to_string(),
            "contact_email" => self.contact_email = value.to_string(),
            "name" => self.name = value.to_string(),
            "denonym" => self.denonym = value.to_string(),
            _ => return false,
        }
        true
    }

    fn relation_mut(&mut self, relation: &str) -> Related<'_> {
        match relation {
            "cities" => Related::from_slice(&mut self.cities),
            "capital" => Related::from_option(self.capital.as_mut()),
            "landmarks" => Related::from_slice(&mut self.landmarks),
            _ => Related::None,
        }
    }
}

impl Path for City {
    const PATH: &'static str = "test_fixtures::City";
}

impl EntityKind for City {
    const MODEL: &'static EntityModel = &CITY_MODEL;
}

impl EntityValue for City {
    fn model(&self) -> &'static EntityModel {
        Self::MODEL
    }

    fn record_id(&self) -> RecordId {
        self.id.into()
    }

    fn text_field(&self, field: &str) -> Option<String> {
        match field {
            "name" => Some(self.name.clone()),
            "denonym" => Some(self.denonym.clone()),
            _ => None,
        }
    }

    fn set_text_field(&mut self, field: &str, value: &str) -> bool {
        match field {
            "name" => self.name = value.to_string(),
            "denonym" => self.denonym = value.to_string(),
            _ => return false,
        }
        true
    }

    fn relation_mut(&mut self, _relation: &str) -> Related<'_> {
        Related::None
    }
}

impl Path for Landmark {
    const PATH: &'static str = "test_fixtures::Landmark";
}

impl EntityKind for Landmark {
    const MODEL: &'static EntityModel = &LANDMARK_MODEL;
}

impl EntityValue for Landmark {
    fn model(&self) -> &'static EntityModel {
        Self::MODEL
    }

    fn record_id(&self) -> RecordId {
        self.id.into()
    }

    fn text_field(&self, field: &str) -> Option<String> {
        match field {
            "name" => Some(self.name.clone()),
            _ => None,
        }
    }

    fn set_text_field(&mut self, field: &str, value: &str) -> bool {
        match field {
            "name" => self.name = value.to_string(),
            _ => return false,
        }
        true
    }

    fn relation_mut(&mut self, _relation: &str) -> Related<'_> {
        Related::None
    }
}

///
/// Builders
///

pub(crate) fn geo_registry() -> EntityRegistry {
    let mut registry = EntityRegistry::new();
    for model in [
        &CONTINENT_MODEL,
        &COUNTRY_MODEL,
        &CITY_MODEL,
        &LANDMARK_MODEL,
    ] {
        registry
            .register(model)
            .expect("fixture models register once");
    }
    registry
}

pub(crate) fn city(id: u64, name: &str, denonym: &str) -> City {
    City {
        id,
        name: name.to_string(),
        denonym: denonym.to_string(),
    }
}

pub(crate) fn landmark(id: u64, name: &str) -> Landmark {
    Landmark {
        id,
        name: name.to_string(),
    }
}

/// Europe with Germany, its capital, one other city, and one landmark.
pub(crate) fn europe() -> Continent {
    Continent {
        id: 100,
        code: "EU".to_string(),
        name: "Europe".to_string(),
        denonym: "European".to_string(),
        countries: vec![Country {
            id: 10,
            code: "DE".to_string(),
            contact_email: "info@germany.example".to_string(),
            name: "Germany".to_string(),
            denonym: "German".to_string(),
            cities: vec![city(1, "Cologne", "Cologner"), city(2, "Munich", "Munichner")],
            capital: Some(city(3, "Berlin", "Berliner")),
            landmarks: vec![landmark(50, "Brandenburg Gate")],
        }],
    }
}

/// Register the graph's foreign-key edges in the reference store so
/// composed related names can be joined.
pub(crate) fn link_graph(store: &MemoryStore, continent: &Continent) {
    for country in &continent.countries {
        store
            .link("Country", country.id, "continent", "Continent", continent.id)
            .expect("link country -> continent");
        for city in &country.cities {
            store
                .link("City", city.id, "country", "Country", country.id)
                .expect("link city -> country");
        }
        if let Some(capital) = &country.capital {
            store
                .link("City", capital.id, "capital_of", "Country", country.id)
                .expect("link capital -> country");
        }
        for landmark in &country.landmarks {
            store
                .link("Landmark", landmark.id, "country", "Country", country.id)
                .expect("link landmark -> country");
        }
    }
}
