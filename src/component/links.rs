use chrono::{Duration, NaiveDateTime};

use url::Url;

use crate::domain::EventDate;
use crate::model::Venue;

const CALENDAR_RENDER_URL: &str = "https://calendar.google.com/calendar/render";
const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/";
const CALENDAR_DATE_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Length of the calendar entry created for a venue
const EVENT_DURATION_HOURS: i64 = 3;

/// Google Calendar "add event" link for one venue on the wedding day.
/// The entry starts at the venue's time when it has one, otherwise at the event time.
pub fn calendar_link(title: &str, venue: &Venue, event_date: &EventDate) -> Url {
    let start = event_date.at_time(venue.time.as_deref());
    let end = start + Duration::hours(EVENT_DURATION_HOURS);

    let text = format!("{} · {}", title, venue.name);
    let details = format!("{} at {}", venue.kind.label(), venue.name);

    Url::parse_with_params(
        CALENDAR_RENDER_URL,
        &[
            ("action", "TEMPLATE"),
            ("text", text.as_str()),
            ("dates", calendar_range(start, end).as_str()),
            ("details", details.as_str()),
            ("location", venue.full_address().as_str()),
        ],
    )
    .expect("Calendar base URL is valid")
}

/// Map link for a venue: its own map URL if set, else its coordinates, else its address text
pub fn maps_link(venue: &Venue) -> Url {
    if let Some(url) = venue.map_url.as_deref().and_then(|u| Url::parse(u).ok()) {
        return url;
    }

    let query = match venue.coordinates {
        Some(coordinates) => format!("{},{}", coordinates.lat, coordinates.lng),
        None => {
            let address = venue.full_address();
            if address.is_empty() {
                venue.name.clone()
            } else {
                format!("{}, {}", venue.name, address)
            }
        }
    };

    Url::parse_with_params(MAPS_SEARCH_URL, &[("api", "1"), ("query", query.as_str())])
        .expect("Maps base URL is valid")
}

fn calendar_range(start: NaiveDateTime, end: NaiveDateTime) -> String {
    format!(
        "{}/{}",
        start.format(CALENDAR_DATE_FORMAT),
        end.format(CALENDAR_DATE_FORMAT)
    )
}
