use std::fmt;

/// Identifier of one of the visual themes an invitation can be rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SkinId {
    RomanticPastel,
    AvantGarde,
    CyberpunkRomance,
    Japandi,
    Retro,
    #[default]
    Dark,
}

impl SkinId {
    pub const ALL: [SkinId; 6] = [
        SkinId::RomanticPastel,
        SkinId::AvantGarde,
        SkinId::CyberpunkRomance,
        SkinId::Japandi,
        SkinId::Retro,
        SkinId::Dark,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkinId::RomanticPastel => "romantic-pastel",
            SkinId::AvantGarde => "avant-garde",
            SkinId::CyberpunkRomance => "cyberpunk-romance",
            SkinId::Japandi => "japandi",
            SkinId::Retro => "retro",
            SkinId::Dark => "dark-bolt",
        }
    }

    /// Look up a skin by identifier, accepting the short aliases used by older invitations.
    /// Returns `None` for anything unknown; use [`SkinId::from_identifier`] for the fallback.
    pub fn lookup(identifier: &str) -> Option<Self> {
        match identifier.trim().to_lowercase().as_str() {
            "romantic-pastel" | "romantic" | "pastel" => Some(SkinId::RomanticPastel),
            "avant-garde" | "editorial" => Some(SkinId::AvantGarde),
            "cyberpunk-romance" | "cyberpunk" => Some(SkinId::CyberpunkRomance),
            "japandi" | "minimal" => Some(SkinId::Japandi),
            "retro" | "retro-vintage" | "vintage" => Some(SkinId::Retro),
            "dark-bolt" | "dark" | "bolt" => Some(SkinId::Dark),
            _ => None,
        }
    }

    /// Resolve an optional identifier, falling back to the default dark skin
    pub fn from_identifier(identifier: Option<&str>) -> Self {
        match identifier {
            Some(id) => Self::lookup(id).unwrap_or_else(|| {
                tracing::debug!("Unknown skin '{}', using the default", id);
                Self::default()
            }),
            None => Self::default(),
        }
    }
}

impl fmt::Display for SkinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
