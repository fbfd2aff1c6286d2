use maud::{html, Markup, Render};

use regex::Regex;

use crate::component::links::{calendar_link, maps_link};
use crate::component::rsvp_form::CUSTOM_FIELD_PREFIX;
use crate::component::{gate, Carousel, FormState, Gated, Remaining, RsvpFields, RsvpForm};
use crate::model::{CustomQuestion, GiftRegistryConfig, QuestionKind};
use crate::render::skin::{Section, Skin};
use crate::render::RenderContext;

/// Shown when the gallery is switched on but has no photos of its own
pub const STOCK_GALLERY: [&str; 3] = [
    "https://images.unsplash.com/photo-1519741497674-611481863552?w=1200",
    "https://images.unsplash.com/photo-1511285560929-80b456fea0bc?w=1200",
    "https://images.unsplash.com/photo-1465495976277-4387d4b0b4c6?w=1200",
];

const DEFAULT_REGISTRY_MESSAGE: &str = "Your presence is the greatest gift of all.";

/// Render one section of a skin's page
pub fn render_section(
    section: Section,
    ctx: &RenderContext<'_>,
    skin: &Skin,
    form: &RsvpForm,
) -> Markup {
    match section {
        Section::Hero => hero(ctx, skin),
        Section::Quote => quote(ctx).render(),
        Section::Countdown => countdown(ctx, skin).render(),
        Section::Agenda => agenda(ctx, skin).render(),
        Section::Venues => venues(ctx, skin).render(),
        Section::DressCode => dress_code(ctx, skin).render(),
        Section::Gallery => gallery(ctx, skin).render(),
        Section::GiftRegistry => gift_registry(ctx, skin).render(),
        Section::Music => music(ctx, skin).render(),
        Section::Rsvp => rsvp(ctx, skin, form).render(),
    }
}

/// Placeholder for a disabled section in preview mode
fn empty_state(key: &str, title: &str) -> Markup {
    html! {
        section class="section empty-state" data-empty=(key) {
            h2 { (title) }
            p.muted { "This section is switched off. Guests will not see it." }
        }
    }
}

fn preview_fallback(ctx: &RenderContext<'_>, key: &str, title: &str) -> Option<Markup> {
    ctx.preview.then(|| empty_state(key, title))
}

pub fn hero(ctx: &RenderContext<'_>, skin: &Skin) -> Markup {
    let invitation = ctx.invitation;
    let content = &invitation.content;
    let background = content
        .cover_image
        .as_deref()
        .filter(|url| is_css_safe(url))
        .map(|url| format!("background-image:url('{}')", url));

    html! {
        header class="section hero" id="hero" style=[background] {
            @if let Some(title) = &invitation.metadata.title {
                p.muted { (title) }
            }
            h1.names { (content.couple.display_names(skin.labels.ampersand)) }
            @if let Some(headline) = &content.headline {
                p.headline { (headline) }
            }
            p.date {
                time datetime=(invitation.event_date().to_string()) {
                    (skin.format_date(&invitation.event_date()))
                }
            }
        }
    }
}

pub fn quote(ctx: &RenderContext<'_>) -> Gated<Markup> {
    let quote = ctx.invitation.content.quote.as_ref();

    gate(quote.is_some(), None, || {
        html! {
            @if let Some(quote) = quote {
                section class="section" id="quote" {
                    blockquote {
                        p { "“" (quote.text) "”" }
                        @if let Some(author) = &quote.author {
                            cite { (author) }
                        }
                    }
                }
            }
        }
    })
}

pub fn countdown(ctx: &RenderContext<'_>, skin: &Skin) -> Gated<Markup> {
    let invitation = ctx.invitation;
    let labels = &skin.labels;

    gate(
        invitation.features.show_countdown,
        preview_fallback(ctx, "countdown", labels.countdown_title),
        || {
            let remaining = Remaining::between(invitation.event_date().as_naive(), ctx.now);
            let units = [
                ("days", remaining.days),
                ("hours", remaining.hours),
                ("minutes", remaining.minutes),
                ("seconds", remaining.seconds),
            ];
            // An expired countdown never changes again, so there is nothing to stream
            let stream = (!remaining.is_expired())
                .then(|| format!("/invitations/{}/countdown/stream", invitation.id()));

            html! {
                section class="section" id="countdown" data-countdown-stream=[stream] {
                    h2 { (labels.countdown_title) }
                    @if remaining.is_expired() {
                        p.expired { (labels.countdown_expired) }
                    }
                    div.countdown {
                        @for (i, (key, value)) in units.iter().enumerate() {
                            div.unit {
                                span.value data-unit=(key) { (format!("{:02}", value)) }
                                span.label { (labels.countdown_units[i]) }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn agenda(ctx: &RenderContext<'_>, skin: &Skin) -> Gated<Markup> {
    let invitation = ctx.invitation;
    let items = &invitation.logistics.agenda;

    gate(
        invitation.features.show_agenda && !items.is_empty(),
        preview_fallback(ctx, "agenda", skin.labels.agenda_title),
        || {
            html! {
                section class="section" id="agenda" {
                    h2 { (skin.labels.agenda_title) }
                    ol.agenda {
                        @for item in items {
                            li.card {
                                span.time { (item.time) }
                                h3 { (item.title) }
                                @if let Some(description) = &item.description {
                                    p.muted { (description) }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn venues(ctx: &RenderContext<'_>, skin: &Skin) -> Gated<Markup> {
    let invitation = ctx.invitation;
    let venues = &invitation.logistics.venues;
    let show_map = invitation.features.show_venue_map;
    let calendar_title = invitation
        .metadata
        .title
        .clone()
        .unwrap_or_else(|| invitation.content.couple.display_names("&"));

    gate(
        !venues.is_empty(),
        preview_fallback(ctx, "venues", skin.labels.venues_title),
        || {
            html! {
                section class="section" id="venues" {
                    h2 { (skin.labels.venues_title) }
                    @for venue in venues {
                        article.card.venue {
                            p.muted {
                                (venue.kind.label())
                                @if let Some(time) = &venue.time {
                                    " · " (time)
                                }
                            }
                            h3 { (venue.name) }
                            @let address = venue.full_address();
                            @if !address.is_empty() {
                                p { (address) }
                            }
                            p.links {
                                a href=(calendar_link(&calendar_title, venue, &invitation.event_date()).as_str())
                                    target="_blank" rel="noopener" data-link="calendar" { "Add to calendar" }
                                @if show_map {
                                    " "
                                    a href=(maps_link(venue).as_str())
                                        target="_blank" rel="noopener" data-link="map" { "View map" }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn dress_code(ctx: &RenderContext<'_>, skin: &Skin) -> Gated<Markup> {
    let invitation = ctx.invitation;
    let dress_code = invitation.logistics.dress_code.as_ref();

    gate(
        invitation.features.show_dress_code && dress_code.is_some(),
        preview_fallback(ctx, "dress-code", skin.labels.dress_code_title),
        || {
            html! {
                @if let Some(dress_code) = dress_code {
                    section class="section" id="dress-code" {
                        h2 { (skin.labels.dress_code_title) }
                        p.code { (dress_code.code) }
                        @if let Some(description) = &dress_code.description {
                            p.muted { (description) }
                        }
                        @if !dress_code.colors.is_empty() {
                            div.swatches {
                                @for colour in dress_code.colors.iter().filter(|c| is_css_colour(c)) {
                                    span.swatch style=(format!("background:{}", colour)) title=(colour) {}
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn gallery(ctx: &RenderContext<'_>, skin: &Skin) -> Gated<Markup> {
    let invitation = ctx.invitation;

    gate(
        invitation.features.show_gallery,
        preview_fallback(ctx, "gallery", skin.labels.gallery_title),
        || {
            let configured = &invitation.content.gallery_images;
            let images: Vec<&str> = if configured.is_empty() {
                STOCK_GALLERY.to_vec()
            } else {
                configured.iter().map(String::as_str).collect()
            };
            let carousel = Carousel::starting_at(images.len(), ctx.photo);

            html! {
                section class="section" id="gallery" {
                    h2 { (skin.labels.gallery_title) }
                    div.carousel data-autoplay-ms=[skin.gallery_autoplay_ms] data-current=(carousel.index()) {
                        @for (i, image) in images.iter().enumerate() {
                            figure data-slide=(i) hidden[i != carousel.index()] {
                                img src=(image) alt=(format!("Photo {} of {}", i + 1, carousel.len())) loading="lazy";
                            }
                        }
                        @if carousel.len() > 1 {
                            nav aria-label="Gallery" {
                                a href=(ctx.photo_path(carousel.peek_prev())) data-carousel="prev" { "‹" }
                                @for i in 0..carousel.len() {
                                    a class=[(i == carousel.index()).then_some("current")]
                                        href=(ctx.photo_path(i)) data-carousel="indicator" data-index=(i) { (i + 1) }
                                }
                                a href=(ctx.photo_path(carousel.peek_next())) data-carousel="next" { "›" }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn gift_registry(ctx: &RenderContext<'_>, skin: &Skin) -> Gated<Markup> {
    let invitation = ctx.invitation;

    gate(
        invitation.features.show_gift_registry,
        preview_fallback(ctx, "gift-registry", skin.labels.registry_title),
        || {
            let default_config = GiftRegistryConfig::default();
            let config = invitation
                .features
                .gift_registry
                .as_ref()
                .unwrap_or(&default_config);

            html! {
                section class="section" id="gift-registry" {
                    h2 { (skin.labels.registry_title) }
                    p { (config.message.as_deref().unwrap_or(DEFAULT_REGISTRY_MESSAGE)) }
                    @if let Some(bank) = &config.bank_details {
                        div.card.bank {
                            p { "Account holder: " (bank.holder) }
                            @if let Some(name) = &bank.bank {
                                p { "Bank: " (name) }
                            }
                            p { "Account: " code { (bank.account) } }
                        }
                    }
                    @if !config.links.is_empty() {
                        ul.registry-links {
                            @for link in &config.links {
                                li { a href=(link.url) target="_blank" rel="noopener" { (link.label) } }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn music(ctx: &RenderContext<'_>, skin: &Skin) -> Gated<Markup> {
    let invitation = ctx.invitation;
    let features = &invitation.features;
    let suggestions_open = features.rsvp.allow_song_suggestions;

    gate(
        features.show_music && (features.music.is_some() || suggestions_open),
        preview_fallback(ctx, "music", skin.labels.music_title),
        || {
            html! {
                section class="section" id="music" {
                    h2 { (skin.labels.music_title) }
                    @if let Some(music) = &features.music {
                        figure.track {
                            @if music.title.is_some() || music.artist.is_some() {
                                figcaption {
                                    (music.title.as_deref().unwrap_or(""))
                                    @if let Some(artist) = &music.artist {
                                        span.muted { " · " (artist) }
                                    }
                                }
                            }
                            audio controls autoplay[music.autoplay] preload="none" src=(music.track_url) {}
                        }
                    }
                    @if suggestions_open {
                        @if !ctx.approved_songs.is_empty() {
                            ul.songs {
                                @for song in ctx.approved_songs {
                                    li {
                                        (song.song_title) " · " (song.artist)
                                        span.muted { " suggested by " (song.guest_name) }
                                    }
                                }
                            }
                        }
                        form.songs method="post" action=(format!("/invitations/{}/songs", invitation.id())) {
                            (page_choices(ctx))
                            input type="text" name="guest_name" placeholder="Your name" required;
                            input type="text" name="song_title" placeholder="Song" required;
                            input type="text" name="artist" placeholder="Artist" required;
                            button type="submit" { "Suggest a song" }
                        }
                    }
                }
            }
        },
    )
}

/// Hidden inputs keeping the skin and preview choices across a form post
fn page_choices(ctx: &RenderContext<'_>) -> Markup {
    html! {
        @if let Some(skin_id) = ctx.skin_override {
            input type="hidden" name="skin" value=(skin_id.as_str());
        }
        @if ctx.preview {
            input type="hidden" name="preview" value="true";
        }
    }
}

pub fn rsvp(ctx: &RenderContext<'_>, skin: &Skin, form: &RsvpForm) -> Gated<Markup> {
    let invitation = ctx.invitation;
    let config = &invitation.features.rsvp;
    let labels = &skin.labels;

    gate(
        invitation.features.show_rsvp,
        preview_fallback(ctx, "rsvp", labels.rsvp_title),
        || {
            html! {
                section class="section" id="rsvp" data-state=(state_name(form.state())) {
                    h2 { (labels.rsvp_title) }
                    @if let Some(message) = &config.message {
                        p { (message) }
                    }
                    @if let Some(deadline) = &config.deadline {
                        p.muted.deadline { "Please reply by " (deadline) }
                    }
                    @if let (FormState::Success, Some(confirmation)) = (form.state(), form.confirmation()) {
                        div.card.confirmation role="status" {
                            p {
                                @if confirmation.attendance {
                                    (labels.rsvp_accepted)
                                } @else {
                                    (labels.rsvp_declined)
                                }
                            }
                            a href=(format!("{}#rsvp", ctx.page_path())) { "Send another response" }
                        }
                    } @else {
                        @if let FormState::Error(message) = form.state() {
                            p.form-error role="alert" { (message) }
                        }
                        (rsvp_form(ctx, skin, form))
                    }
                }
            }
        },
    )
}

fn rsvp_form(ctx: &RenderContext<'_>, skin: &Skin, form: &RsvpForm) -> Markup {
    let invitation = ctx.invitation;
    let config = &invitation.features.rsvp;
    let fields = form.fields();
    let max_guests = config.max_guests.max(1);

    html! {
        form.rsvp method="post" action=(format!("/invitations/{}/rsvp", invitation.id())) {
            (page_choices(ctx))
            fieldset disabled[!form.is_editable()] {
                label { "Name" input type="text" name="name" required value=(fields.name); }
                label { "Email" input type="email" name="email" value=(fields.email); }
                label { "Phone" input type="tel" name="phone" value=(fields.phone); }
                div.attendance {
                    label {
                        input type="radio" name="attendance" value="yes" required checked[fields.attendance == Some(true)];
                        " Joyfully accepts"
                    }
                    label {
                        input type="radio" name="attendance" value="no" checked[fields.attendance == Some(false)];
                        " Regretfully declines"
                    }
                }
                label {
                    "Number of guests"
                    select name="guests_count" {
                        @for n in 1..=max_guests {
                            option value=(n) selected[n == fields.guests_count] { (n) }
                        }
                    }
                }
                label {
                    "Dietary restrictions"
                    input type="text" name="dietary_restrictions" value=(fields.dietary_restrictions);
                }
                @for question in &config.custom_questions {
                    (custom_question(question, fields))
                }
                @if config.allow_song_suggestions {
                    label {
                        "A song that will get you dancing"
                        input type="text" name="music_suggestion" value=(fields.music_suggestion);
                    }
                }
                label { "Message" textarea name="message" rows="3" { (fields.message) } }
                button type="submit" { (skin.labels.rsvp_submit) }
            }
        }
    }
}

fn custom_question(question: &CustomQuestion, fields: &RsvpFields) -> Markup {
    let name = format!("{}{}", CUSTOM_FIELD_PREFIX, question.id);
    let answer = fields
        .custom_answers
        .get(&question.id)
        .map(String::as_str)
        .unwrap_or("");
    let options: Vec<&str> = match question.kind {
        QuestionKind::Text => Vec::new(),
        QuestionKind::YesNo => vec!["yes", "no"],
        QuestionKind::Choice => question.options.iter().map(String::as_str).collect(),
    };

    html! {
        label.custom-question {
            (question.label)
            @if question.kind == QuestionKind::Text {
                input type="text" name=(name) required[question.required] value=(answer);
            } @else {
                select name=(name) required[question.required] {
                    option value="" { "Choose…" }
                    @for choice in options {
                        option value=(choice) selected[choice == answer] { (choice) }
                    }
                }
            }
        }
    }
}

fn state_name(state: &FormState) -> &'static str {
    match state {
        FormState::Editing => "editing",
        FormState::Submitting => "submitting",
        FormState::Success => "success",
        FormState::Error(_) => "error",
    }
}

/// Values interpolated into inline CSS may not break out of the declaration
fn is_css_safe(value: &str) -> bool {
    !value
        .chars()
        .any(|c| matches!(c, '\'' | '"' | '(' | ')' | ';' | '\\' | '<' | '>'))
}

fn is_css_colour(value: &str) -> bool {
    lazy_static::lazy_static! {
        static ref COLOUR_REGEX: Regex =
            Regex::new(r"^(#[0-9a-fA-F]{3,8}|[a-zA-Z]{3,20}|rgba?\([0-9.,%\s]+\))$").unwrap();
    }
    COLOUR_REGEX.is_match(value.trim())
}
