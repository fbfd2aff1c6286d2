use crate::domain::{EventDate, SkinId};

/// Sections a skin can place on its page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Hero,
    Quote,
    Countdown,
    Agenda,
    Venues,
    DressCode,
    Gallery,
    GiftRegistry,
    Music,
    Rsvp,
}

/// Colours and fonts, emitted as CSS custom properties
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub accent: &'static str,
    pub heading_font: &'static str,
    pub body_font: &'static str,
}

/// Copy a skin puts on its sections
#[derive(Debug, Clone, Copy)]
pub struct Labels {
    pub ampersand: &'static str,
    pub countdown_title: &'static str,
    /// Days, hours, minutes, seconds
    pub countdown_units: [&'static str; 4],
    pub countdown_expired: &'static str,
    pub agenda_title: &'static str,
    pub venues_title: &'static str,
    pub dress_code_title: &'static str,
    pub gallery_title: &'static str,
    pub registry_title: &'static str,
    pub music_title: &'static str,
    pub rsvp_title: &'static str,
    pub rsvp_submit: &'static str,
    pub rsvp_accepted: &'static str,
    pub rsvp_declined: &'static str,
}

const DEFAULT_LABELS: Labels = Labels {
    ampersand: "&",
    countdown_title: "Countdown",
    countdown_units: ["Days", "Hours", "Minutes", "Seconds"],
    countdown_expired: "The big day is here",
    agenda_title: "Schedule",
    venues_title: "Venues",
    dress_code_title: "Dress code",
    gallery_title: "Gallery",
    registry_title: "Gift registry",
    music_title: "Music",
    rsvp_title: "RSVP",
    rsvp_submit: "Send RSVP",
    rsvp_accepted: "Thank you! We can't wait to celebrate with you.",
    rsvp_declined: "Thank you for letting us know. You will be missed.",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    Long,
    Short,
}

/// Everything that makes one skin look like itself.
/// Behaviour is shared; only presentation lives here.
#[derive(Debug, Clone, Copy)]
pub struct Skin {
    pub id: SkinId,
    pub theme: Theme,
    pub labels: Labels,
    pub sections: &'static [Section],
    pub date_style: DateStyle,
    /// Milliseconds between automatic gallery steps, `None` for manual-only
    pub gallery_autoplay_ms: Option<u64>,
}

impl Skin {
    pub fn format_date(&self, date: &EventDate) -> String {
        match self.date_style {
            DateStyle::Long => date.long_date(),
            DateStyle::Short => date.short_date(),
        }
    }

    /// CSS variables and base rules for the page
    pub fn stylesheet(&self) -> String {
        let t = &self.theme;
        format!(
            ":root{{--bg:{};--surface:{};--text:{};--muted:{};--accent:{};--heading-font:{};--body-font:{}}}\
             {}",
            t.background, t.surface, t.text, t.muted, t.accent, t.heading_font, t.body_font, BASE_CSS
        )
    }
}

const BASE_CSS: &str = "\
*{box-sizing:border-box}\
body{margin:0;background:var(--bg);color:var(--text);font-family:var(--body-font);line-height:1.6}\
h1,h2,h3{font-family:var(--heading-font);font-weight:400;margin:0 0 .5em}\
a{color:var(--accent)}\
main{max-width:960px;margin:0 auto;padding:0 1.5rem}\
.section{padding:4rem 0;text-align:center}\
.hero{min-height:80vh;display:flex;flex-direction:column;justify-content:center;background-size:cover;background-position:center}\
.hero .names{font-size:clamp(2.5rem,8vw,5rem)}\
.muted{color:var(--muted)}\
.card{background:var(--surface);border-radius:.5rem;padding:1.5rem;margin:1rem auto;max-width:32rem}\
.countdown{display:flex;gap:1.5rem;justify-content:center}\
.countdown .value{font-size:2.5rem;font-family:var(--heading-font);display:block}\
.agenda{list-style:none;padding:0}\
.swatches{display:flex;gap:.5rem;justify-content:center}\
.swatch{width:2rem;height:2rem;border-radius:50%;display:inline-block;border:1px solid var(--muted)}\
.carousel img{max-width:100%;border-radius:.5rem}\
.carousel nav a{margin:0 .25rem;text-decoration:none}\
.carousel nav a.current{font-weight:700}\
.empty-state{border:2px dashed var(--muted);border-radius:.5rem;margin:2rem 0;padding:2rem;opacity:.7}\
form.rsvp label{display:block;text-align:left;margin:.75rem 0}\
form.rsvp input,form.rsvp select,form.rsvp textarea{width:100%;padding:.5rem;font:inherit}\
.form-error{color:#b00020}\
button{background:var(--accent);color:var(--bg);border:0;padding:.75rem 2rem;font:inherit;cursor:pointer}";

const ROMANTIC_SECTIONS: &[Section] = &[
    Section::Hero,
    Section::Quote,
    Section::Countdown,
    Section::Agenda,
    Section::Venues,
    Section::Gallery,
    Section::DressCode,
    Section::GiftRegistry,
    Section::Music,
    Section::Rsvp,
];

const EDITORIAL_SECTIONS: &[Section] = &[
    Section::Hero,
    Section::Gallery,
    Section::Quote,
    Section::Agenda,
    Section::Venues,
    Section::DressCode,
    Section::Countdown,
    Section::GiftRegistry,
    Section::Music,
    Section::Rsvp,
];

const CYBERPUNK_SECTIONS: &[Section] = &[
    Section::Hero,
    Section::Countdown,
    Section::Venues,
    Section::Agenda,
    Section::Gallery,
    Section::DressCode,
    Section::Music,
    Section::GiftRegistry,
    Section::Rsvp,
];

const JAPANDI_SECTIONS: &[Section] = &[
    Section::Hero,
    Section::Quote,
    Section::Agenda,
    Section::Venues,
    Section::Countdown,
    Section::DressCode,
    Section::Gallery,
    Section::GiftRegistry,
    Section::Rsvp,
    Section::Music,
];

const RETRO_SECTIONS: &[Section] = &[
    Section::Hero,
    Section::Countdown,
    Section::Quote,
    Section::Venues,
    Section::Agenda,
    Section::Gallery,
    Section::Music,
    Section::DressCode,
    Section::GiftRegistry,
    Section::Rsvp,
];

const DARK_SECTIONS: &[Section] = &[
    Section::Hero,
    Section::Countdown,
    Section::Agenda,
    Section::Venues,
    Section::DressCode,
    Section::Gallery,
    Section::GiftRegistry,
    Section::Music,
    Section::Rsvp,
];

static SKINS: [Skin; 6] = [
    Skin {
        id: SkinId::RomanticPastel,
        theme: Theme {
            background: "#fdf6f9",
            surface: "#ffffff",
            text: "#5a4a55",
            muted: "#9c8a95",
            accent: "#d8a7b1",
            heading_font: "'Playfair Display',Georgia,serif",
            body_font: "'Lato',Helvetica,sans-serif",
        },
        labels: Labels {
            countdown_title: "Counting down to forever",
            countdown_expired: "Today we say I do",
            agenda_title: "Our day",
            gallery_title: "Our story",
            registry_title: "Wishes",
            rsvp_title: "Will you join us?",
            ..DEFAULT_LABELS
        },
        sections: ROMANTIC_SECTIONS,
        date_style: DateStyle::Long,
        gallery_autoplay_ms: Some(5_000),
    },
    Skin {
        id: SkinId::AvantGarde,
        theme: Theme {
            background: "#f4f1ea",
            surface: "#ffffff",
            text: "#111111",
            muted: "#6b6b6b",
            accent: "#e63312",
            heading_font: "'Bodoni Moda',Didot,serif",
            body_font: "'Helvetica Neue',Arial,sans-serif",
        },
        labels: Labels {
            ampersand: "+",
            countdown_title: "Issue No. 1 out in",
            countdown_units: ["D", "H", "M", "S"],
            countdown_expired: "Out now",
            agenda_title: "Running order",
            venues_title: "Locations",
            gallery_title: "Portfolio",
            rsvp_title: "Reply",
            rsvp_submit: "Submit",
            ..DEFAULT_LABELS
        },
        sections: EDITORIAL_SECTIONS,
        date_style: DateStyle::Short,
        gallery_autoplay_ms: None,
    },
    Skin {
        id: SkinId::CyberpunkRomance,
        theme: Theme {
            background: "#0a0014",
            surface: "#1a0530",
            text: "#e0f7ff",
            muted: "#7f6aa3",
            accent: "#ff2bd6",
            heading_font: "'Orbitron',sans-serif",
            body_font: "'Share Tech Mono',monospace",
        },
        labels: Labels {
            ampersand: "×",
            countdown_title: "T-MINUS",
            countdown_units: ["DAYS", "HRS", "MIN", "SEC"],
            countdown_expired: "SYSTEM ONLINE: JUST MARRIED",
            agenda_title: "EXECUTION LOG",
            venues_title: "COORDINATES",
            dress_code_title: "DRESS PROTOCOL",
            gallery_title: "MEMORY DUMP",
            registry_title: "CREDIT TRANSFER",
            music_title: "AUDIO FEED",
            rsvp_title: "CONFIRM UPLINK",
            rsvp_submit: "TRANSMIT",
            rsvp_accepted: "UPLINK CONFIRMED. SEE YOU IN THE NEON.",
            rsvp_declined: "SIGNAL RECEIVED. WE'LL MISS YOU.",
            ..DEFAULT_LABELS
        },
        sections: CYBERPUNK_SECTIONS,
        date_style: DateStyle::Short,
        gallery_autoplay_ms: Some(3_000),
    },
    Skin {
        id: SkinId::Japandi,
        theme: Theme {
            background: "#f5f1eb",
            surface: "#ebe5dc",
            text: "#3d3a35",
            muted: "#8b857b",
            accent: "#8b7d6b",
            heading_font: "'Cormorant Garamond',Garamond,serif",
            body_font: "'Noto Sans JP',sans-serif",
        },
        labels: Labels {
            countdown_title: "Until we meet",
            agenda_title: "The day, quietly",
            venues_title: "Places",
            gallery_title: "Moments",
            rsvp_title: "Kindly reply",
            ..DEFAULT_LABELS
        },
        sections: JAPANDI_SECTIONS,
        date_style: DateStyle::Long,
        gallery_autoplay_ms: None,
    },
    Skin {
        id: SkinId::Retro,
        theme: Theme {
            background: "#fdf0d5",
            surface: "#f6d7a7",
            text: "#3a2e1f",
            muted: "#7d6a55",
            accent: "#c1440e",
            heading_font: "'Abril Fatface',serif",
            body_font: "'Courier Prime',monospace",
        },
        labels: Labels {
            countdown_title: "Save the date",
            agenda_title: "Program",
            gallery_title: "Snapshots",
            music_title: "On the jukebox",
            rsvp_title: "R.S.V.P.",
            ..DEFAULT_LABELS
        },
        sections: RETRO_SECTIONS,
        date_style: DateStyle::Short,
        gallery_autoplay_ms: Some(5_000),
    },
    Skin {
        id: SkinId::Dark,
        theme: Theme {
            background: "#0b0b0f",
            surface: "#17171f",
            text: "#f2f2f2",
            muted: "#8a8a99",
            accent: "#ffd400",
            heading_font: "'Bebas Neue',Impact,sans-serif",
            body_font: "'Inter',Helvetica,sans-serif",
        },
        labels: DEFAULT_LABELS,
        sections: DARK_SECTIONS,
        date_style: DateStyle::Long,
        gallery_autoplay_ms: Some(3_000),
    },
];

/// Presentation table for a skin
pub fn skin(id: SkinId) -> &'static Skin {
    SKINS
        .iter()
        .find(|skin| skin.id == id)
        .unwrap_or(&SKINS[SKINS.len() - 1])
}
