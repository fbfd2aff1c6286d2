use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::component::RsvpForm;
use crate::render::sections::render_section;
use crate::render::skin::Skin;
use crate::render::RenderContext;

/// Progressive enhancement: live countdown over SSE and gallery autoplay.
/// The page is complete without it.
const SCRIPT: &str = r#"
(function () {
  var countdown = document.querySelector("[data-countdown-stream]");
  if (countdown && window.EventSource) {
    var source = new EventSource(countdown.getAttribute("data-countdown-stream"));
    source.onmessage = function (event) {
      var remaining = JSON.parse(event.data);
      ["days", "hours", "minutes", "seconds"].forEach(function (unit) {
        var el = countdown.querySelector('[data-unit="' + unit + '"]');
        if (el) { el.textContent = String(remaining[unit]).padStart(2, "0"); }
      });
      if (remaining.days + remaining.hours + remaining.minutes + remaining.seconds === 0) {
        source.close();
      }
    };
  }

  var carousel = document.querySelector(".carousel[data-autoplay-ms]");
  if (carousel) {
    var slides = carousel.querySelectorAll("[data-slide]");
    var dots = carousel.querySelectorAll('[data-carousel="indicator"]');
    var index = Number(carousel.getAttribute("data-current")) || 0;
    var paused = false;
    var show = function (next) {
      slides[index].hidden = true;
      if (dots[index]) { dots[index].classList.remove("current"); }
      index = (next + slides.length) % slides.length;
      slides[index].hidden = false;
      if (dots[index]) { dots[index].classList.add("current"); }
    };
    carousel.addEventListener("mouseenter", function () { paused = true; });
    carousel.addEventListener("mouseleave", function () { paused = false; });
    if (slides.length > 1) {
      setInterval(function () { if (!paused) { show(index + 1); } },
        Number(carousel.getAttribute("data-autoplay-ms")));
    }
  }
})();
"#;

/// Full HTML document for one invitation in one skin
pub fn page(ctx: &RenderContext<'_>, skin: &Skin, form: &RsvpForm) -> Markup {
    let invitation = ctx.invitation;
    let couple = &invitation.content.couple;
    let title = invitation
        .metadata
        .title
        .clone()
        .unwrap_or_else(|| couple.display_names(skin.labels.ampersand));

    html! {
        (DOCTYPE)
        html lang="en" data-skin=(skin.id.as_str()) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (PreEscaped(skin.stylesheet())) }
            }
            body class=(format!("skin-{}", skin.id)) {
                @if ctx.preview {
                    div.preview-banner role="status" {
                        "Preview: switched-off sections are shown as placeholders"
                    }
                }
                main {
                    @for section in skin.sections {
                        (render_section(*section, ctx, skin, form))
                    }
                }
                footer.section.muted {
                    (couple.initials()) " · " (invitation.event_date().short_date())
                }
                script { (PreEscaped(SCRIPT)) }
            }
        }
    }
}
