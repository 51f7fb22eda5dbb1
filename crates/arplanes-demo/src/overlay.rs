//! Terminal debug overlay

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetForegroundColor};

use arplanes::Color;

use crate::session::SessionSnapshot;

const SWATCH: &str = "\u{25A0}\u{25A0}";

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Tracked plane count, one colored swatch line per plane, then placed anchors
pub fn render_overlay<W: Write>(out: &mut W, snapshot: &SessionSnapshot) -> io::Result<()> {
    queue!(
        out,
        SetAttribute(Attribute::Bold),
        Print(format!("tracked planes: {}\n", snapshot.tracked)),
        SetAttribute(Attribute::Reset),
    )?;

    for plane in &snapshot.planes {
        queue!(
            out,
            Print("  "),
            SetForegroundColor(term_color(plane.color)),
            Print(SWATCH),
            ResetColor,
            Print(format!(
                " {:<12} {}  {} vertices, {} triangles\n",
                plane.id, plane.color, plane.vertices, plane.triangles
            )),
        )?;
    }

    queue!(out, Print(format!("anchors: {}\n", snapshot.anchors.len())))?;
    for anchor in &snapshot.anchors {
        let p = anchor.transform.position;
        let on = anchor
            .plane_id
            .as_ref()
            .map_or_else(|| "-".to_string(), |id| id.to_string());
        queue!(
            out,
            Print(format!(
                "  #{} on {:<12} ({:.2}, {:.2}, {:.2})\n",
                anchor.id, on, p.x, p.y, p.z
            )),
        )?;
    }

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::PlaneSummary;
    use arplanes::hit::Anchor;
    use arplanes::{Transform, Vec3};

    fn snapshot() -> SessionSnapshot {
        SessionSnapshot {
            tracked: 1,
            planes: vec![PlaneSummary {
                id: "table".into(),
                color: Color::from_u32(0xF44336),
                vertices: 4,
                triangles: 2,
            }],
            anchors: vec![Anchor {
                id: 0,
                transform: Transform::from_position(Vec3::new(3.0, 0.7, 0.0)),
                plane_id: Some("table".into()),
            }],
        }
    }

    #[test]
    fn test_overlay_lists_planes_and_anchors() {
        let mut out = Vec::new();
        render_overlay(&mut out, &snapshot()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("tracked planes: 1"));
        assert!(text.contains("#F44336"));
        assert!(text.contains("4 vertices, 2 triangles"));
        assert!(text.contains("anchors: 1"));
        assert!(text.contains("(3.00, 0.70, 0.00)"));
    }

    #[test]
    fn test_overlay_swatch_uses_plane_color() {
        let mut out = Vec::new();
        render_overlay(&mut out, &snapshot()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("38;2;244;67;54"));
    }
}
