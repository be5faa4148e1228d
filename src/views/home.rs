//! "¿Es viernes hoy?" page

use crate::{
    models::scene::{Classification, ForcedMode, PageState},
    services::scene::format_countdown,
};

use super::{document, escape};

const STYLE: &str = r#"
  :root { font-family: system-ui, -apple-system, Segoe UI, sans-serif; color-scheme: dark; }
  body { margin: 0; min-height: 100vh; display: flex; flex-direction: column; align-items: center;
         text-align: center; padding: 3rem 1.5rem; box-sizing: border-box; }
  body.friday { background: linear-gradient(135deg, #064e3b, #047857 50%, #0f172a); color: #d1fae5; }
  body.not-friday { background: linear-gradient(135deg, #020617, #171717 50%, #000); color: #f5f5f5; }
  .brand { letter-spacing: 0.5em; text-transform: uppercase; opacity: 0.6; }
  h1 { font-size: clamp(2rem, 6vw, 4.5rem); text-transform: uppercase; margin: 0.5rem 0 2rem; }
  .answer { font-size: clamp(4rem, 14vw, 9rem); font-weight: 900; text-transform: uppercase; margin: 0; }
  .friday .answer { color: #10b981; }
  .not-friday .answer { color: #ef4444; }
  .badge { display: inline-block; border-radius: 999px; padding: 0.25rem 1rem; margin: 0.25rem;
           font-size: 0.75rem; letter-spacing: 0.3em; text-transform: uppercase; border: 1px solid currentColor; }
  .countdown { border-radius: 999px; padding: 0.5rem 1.5rem; background: #ef4444; color: #fef2f2;
               text-transform: uppercase; letter-spacing: 0.35em; font-size: 0.85rem; }
  figure { margin: 2rem 0 0; max-width: 64rem; width: 100%; }
  figure img { width: 100%; border-radius: 1.5rem; border: 1px solid rgba(255,255,255,0.4); }
"#;

/// Render the page for a given state
pub fn render(state: &PageState) -> String {
    let (class, content) = match state {
        PageState::Loading => (
            "not-friday",
            r#"<p>Preguntando a los astros...</p>"#.to_string(),
        ),
        PageState::Error { message } => (
            "not-friday",
            format!(
                r#"<p class="answer">Ups</p>
    <p>{}</p>"#,
                escape(message)
            ),
        ),
        PageState::Ready(c) => (
            if c.is_friday { "friday" } else { "not-friday" },
            render_ready(c),
        ),
    };

    let body = format!(
        r#"  <main>
    <p class="brand">esvierneshoy.com</p>
    <h1>¿Es viernes hoy?</h1>
    {}
  </main>"#,
        content
    );

    document("¿Es viernes hoy?", STYLE, class, &body)
}

fn render_ready(c: &Classification) -> String {
    let mut html = String::new();

    if c.is_friday {
        html.push_str(r#"<p class="answer">¡Sí!</p>"#);
        html.push_str(&format!(
            "\n    <p>Hoy es viernes en la zona horaria <strong>{}</strong>.</p>",
            escape(&c.timezone)
        ));
    } else {
        html.push_str(r#"<p class="answer">¡No!</p>"#);
        html.push_str(&format!(
            "\n    <p>Hoy no es viernes; es <strong>{}</strong> en la zona horaria <strong>{}</strong>.</p>",
            escape(&c.weekday_name),
            escape(&c.timezone)
        ));
    }

    html.push_str(&format!(
        "\n    <span class=\"badge\">Temporada {}</span>",
        escape(&c.scene.season_label)
    ));

    if let Some(mode) = c.forced_mode {
        let label = match mode {
            ForcedMode::Friday => "viernes",
            ForcedMode::No => "no viernes",
        };
        html.push_str(&format!("\n    <span class=\"badge\">Modo forzado: {}</span>", label));
    }

    html.push_str(&format!(
        "\n    <p><time datetime=\"{}\">{}</time></p>",
        escape(&c.local_date_iso),
        escape(&c.local_date_iso.replace('T', " "))
    ));

    if !c.is_friday {
        html.push_str(&format!(
            "\n    <p class=\"countdown\">Falta {} para el viernes</p>",
            escape(&format_countdown(c.seconds_until_friday))
        ));
    }

    html.push_str(&format!(
        "\n    <figure><img src=\"{}\" alt=\"Escena de {}\" width=\"1280\" height=\"720\"></figure>",
        escape(&c.scene.url),
        escape(&c.scene.season_label)
    ));

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::scene::{Scene, SceneSource, Season};
    use chrono::Utc;

    fn classification(is_friday: bool, forced_mode: Option<ForcedMode>) -> Classification {
        Classification {
            timezone: "Europe/Madrid".to_string(),
            is_friday,
            forced_mode,
            season: Season::Summer,
            generated_at: Utc::now(),
            local_date_iso: "2024-07-03T12:00:00".to_string(),
            weekday_name: "Miércoles".to_string(),
            seconds_until_friday: 36 * 3600,
            scene: Scene {
                url: "/ai/not-friday/summer/desk.jpg".to_string(),
                season_key: Season::Summer,
                season_label: "verano".to_string(),
                gallery_count: 1,
                source: SceneSource::LocalGallery,
            },
        }
    }

    #[test]
    fn test_render_not_friday() {
        let html = render(&PageState::Ready(classification(false, None)));
        assert!(html.contains("¡No!"));
        assert!(html.contains("Miércoles"));
        assert!(html.contains("Falta 1 día y 12 horas para el viernes"));
        assert!(html.contains(r#"src="/ai/not-friday/summer/desk.jpg""#));
        assert!(html.contains(r#"<body class="not-friday">"#));
        assert!(!html.contains("Modo forzado"));
    }

    #[test]
    fn test_render_forced_friday() {
        let html = render(&PageState::Ready(classification(true, Some(ForcedMode::Friday))));
        assert!(html.contains("¡Sí!"));
        assert!(html.contains("Modo forzado: viernes"));
        assert!(!html.contains("Falta"));
        assert!(html.contains(r#"<body class="friday">"#));
    }

    #[test]
    fn test_render_error_escapes_message() {
        let html = render(&PageState::Error {
            message: "<b>roto</b>".to_string(),
        });
        assert!(html.contains("Ups"));
        assert!(html.contains("&lt;b&gt;roto&lt;/b&gt;"));
    }
}
