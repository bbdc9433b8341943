use std::borrow::Cow;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Names of the context slots a group key can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum ContextKey {
    Side,
    Region,
    Site,
    MuscleGroup,
    PainType,
}

impl ContextKey {
    pub const ALL: [ContextKey; 5] = [
        ContextKey::Side,
        ContextKey::Region,
        ContextKey::Site,
        ContextKey::MuscleGroup,
        ContextKey::PainType,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContextKey::Side => "side",
            ContextKey::Region => "region",
            ContextKey::Site => "site",
            ContextKey::MuscleGroup => "muscleGroup",
            ContextKey::PainType => "painType",
        }
    }

    /// The slot a group key fills, if any. A palpation site key fills
    /// [`ContextKey::Site`] (and implicitly the muscle group).
    pub fn implied_by(key: &str) -> Option<ContextKey> {
        if Side::from_key(key).is_some() {
            Some(ContextKey::Side)
        } else if Region::from_key(key).is_some() {
            Some(ContextKey::Region)
        } else if Site::from_key(key).is_some() {
            Some(ContextKey::Site)
        } else if PainType::from_key(key).is_some() {
            Some(ContextKey::PainType)
        } else {
            None
        }
    }
}

macro_rules! context_vocabulary {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $key:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
        pub enum $name {
            $(#[serde(rename = $key)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn from_key(key: &str) -> Option<Self> {
                match key {
                    $($key => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $key,)+
                }
            }
        }
    };
}

context_vocabulary!(
    /// Body side.
    Side {
        Left => "left",
        Right => "right",
    }
);

context_vocabulary!(
    /// Anatomical region used by the pain interview. `OtherMast` and `NonMast`
    /// are the catch-all "other masticatory" and "non-masticatory" regions.
    Region {
        Temporalis => "temporalis",
        Masseter => "masseter",
        Tmj => "tmj",
        OtherMast => "otherMast",
        NonMast => "nonMast",
    }
);

context_vocabulary!(
    /// Palpation site. Each belongs to exactly one [`MuscleGroup`].
    Site {
        TemporalisPosterior => "temporalisPosterior",
        TemporalisMiddle => "temporalisMiddle",
        TemporalisAnterior => "temporalisAnterior",
        MasseterOrigin => "masseterOrigin",
        MasseterBody => "masseterBody",
        MasseterInsertion => "masseterInsertion",
        TmjLateralPole => "tmjLateralPole",
        TmjAroundLateralPole => "tmjAroundLateralPole",
        PosteriorMandibular => "posteriorMandibular",
        Submandibular => "submandibular",
        LateralPterygoid => "lateralPterygoid",
        TemporalisTendon => "temporalisTendon",
    }
);

context_vocabulary!(
    MuscleGroup {
        Temporalis => "temporalis",
        Masseter => "masseter",
        Tmj => "tmj",
        Supplemental => "supplemental",
    }
);

context_vocabulary!(
    PainType {
        Pain => "pain",
        FamiliarPain => "familiarPain",
        FamiliarHeadache => "familiarHeadache",
        ReferredPain => "referredPain",
        SpreadingPain => "spreadingPain",
    }
);

impl Site {
    pub fn muscle_group(&self) -> MuscleGroup {
        match self {
            Site::TemporalisPosterior | Site::TemporalisMiddle | Site::TemporalisAnterior => {
                MuscleGroup::Temporalis
            }
            Site::MasseterOrigin | Site::MasseterBody | Site::MasseterInsertion => {
                MuscleGroup::Masseter
            }
            Site::TmjLateralPole | Site::TmjAroundLateralPole => MuscleGroup::Tmj,
            Site::PosteriorMandibular
            | Site::Submandibular
            | Site::LateralPterygoid
            | Site::TemporalisTendon => MuscleGroup::Supplemental,
        }
    }
}

/// Semantic metadata accumulated while descending a model tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<Site>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muscle_group: Option<MuscleGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pain_type: Option<PainType>,
}

impl Context {
    pub fn get(&self, key: ContextKey) -> Option<&'static str> {
        match key {
            ContextKey::Side => self.side.map(|v| v.as_str()),
            ContextKey::Region => self.region.map(|v| v.as_str()),
            ContextKey::Site => self.site.map(|v| v.as_str()),
            ContextKey::MuscleGroup => self.muscle_group.map(|v| v.as_str()),
            ContextKey::PainType => self.pain_type.map(|v| v.as_str()),
        }
    }

    pub fn is_empty(&self) -> bool {
        ContextKey::ALL.iter().all(|key| self.get(*key).is_none())
    }
}

/// Returns the context a child keyed `key` sees.
///
/// Unrecognized keys hand back the caller's own reference, so callers can
/// short-circuit on `Cow::Borrowed`. Recognized keys produce a new context with
/// the matching slot(s) overwritten.
pub fn enrich_context<'a>(context: &'a Context, key: &str) -> Cow<'a, Context> {
    if let Some(side) = Side::from_key(key) {
        return Cow::Owned(Context {
            side: Some(side),
            ..*context
        });
    }
    if let Some(region) = Region::from_key(key) {
        return Cow::Owned(Context {
            region: Some(region),
            ..*context
        });
    }
    if let Some(site) = Site::from_key(key) {
        return Cow::Owned(Context {
            site: Some(site),
            muscle_group: Some(site.muscle_group()),
            ..*context
        });
    }
    if let Some(pain_type) = PainType::from_key(key) {
        return Cow::Owned(Context {
            pain_type: Some(pain_type),
            ..*context
        });
    }
    Cow::Borrowed(context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_site_maps_to_a_group() {
        for site in Site::ALL {
            let base = Context::default();
            let enriched = enrich_context(&base, site.as_str());
            assert_eq!(enriched.site, Some(*site));
            assert_eq!(enriched.muscle_group, Some(site.muscle_group()));
        }
    }

    #[test]
    fn vocabularies_do_not_overlap() {
        let mut keys: Vec<&str> = Side::ALL.iter().map(Side::as_str).collect();
        keys.extend(Region::ALL.iter().map(Region::as_str));
        keys.extend(Site::ALL.iter().map(Site::as_str));
        keys.extend(PainType::ALL.iter().map(PainType::as_str));
        let total = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }

    #[test]
    fn implied_key_follows_tables() {
        assert_eq!(ContextKey::implied_by("right"), Some(ContextKey::Side));
        assert_eq!(ContextKey::implied_by("nonMast"), Some(ContextKey::Region));
        assert_eq!(ContextKey::implied_by("masseterBody"), Some(ContextKey::Site));
        assert_eq!(ContextKey::implied_by("referredPain"), Some(ContextKey::PainType));
        assert_eq!(ContextKey::implied_by("measurement"), None);
    }

    #[test]
    fn recognized_key_leaves_input_untouched() {
        let base = Context {
            side: Some(Side::Left),
            ..Context::default()
        };
        let enriched = enrich_context(&base, "right");
        assert!(matches!(enriched, Cow::Owned(_)));
        assert_eq!(enriched.side, Some(Side::Right));
        assert_eq!(base.side, Some(Side::Left));
    }
}
