use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use rand::Rng;

use super::io_error;
use crate::board::Board;
use crate::error::{Mode, Result};

const CELL: f32 = 16.0;
const SPOT: f32 = 2.8;
const THIN: f32 = 1.0;
const THICK: f32 = 2.0;

/// Draw the board: grid lines, a dot per cell and a closed polyline per cycle.
///
/// Cycles get a random colour each when there is more than one of them.
pub fn render_svg<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Result<String> {
    board.require("render_svg", Mode::Undirected)?;
    let (w, h) = (board.width(), board.height());
    let sw = (w as f32 * CELL).ceil() as u32;
    let sh = (h as f32 * CELL).ceil() as u32;
    let multi = board.tourney_ids().count > 1;

    let mut s = String::new();
    s.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    s.push_str(&format!(
        r#"<svg width="{0}" height="{1}" viewBox="-4 -4 {0} {1}" xmlns="http://www.w3.org/2000/svg">"#,
        sw + 8,
        sh + 8
    ));
    s.push_str(&format!(
        "<style>circle{{fill:black;r:{SPOT:.1}}}polyline{{fill:none;stroke:black;stroke-width:{THICK:.1}}}line{{stroke:black;stroke-width:{THICK:.1}}}</style>"
    ));
    s.push_str(&format!(r#"<rect width="{sw}" height="{sh}" style="fill:white;stroke:black;stroke-width:{THIN}"/>"#));

    for i in 1..h {
        let y = i as f32 * CELL;
        s.push_str(&format!(r#"<line x1="0" y1="{y}" x2="{sw}" y2="{y}" style="stroke-width:{THIN}"/>"#));
    }
    for i in 1..w {
        let x = i as f32 * CELL;
        s.push_str(&format!(r#"<line x1="{x}" y1="0" x2="{x}" y2="{sh}" style="stroke-width:{THIN}"/>"#));
    }

    let centre = |c: usize| (((c % w) as f32 + 0.5) * CELL, ((c / w) as f32 + 0.5) * CELL);
    let mut drawn = vec![false; board.size()];
    for start in 0..board.size() {
        if drawn[start] {
            continue;
        }
        let cycle = board.cycle_from(start)?;
        let (fill, stroke) = if multi {
            let (r, g, b): (u8, u8, u8) = (rng.gen(), rng.gen(), rng.gen());
            (
                format!(r#"style="fill:rgb({r},{g},{b})" "#),
                format!(r#"style="stroke:rgb({r},{g},{b})" "#),
            )
        } else {
            (String::new(), String::new())
        };

        let mut points = String::new();
        for &c in &cycle {
            drawn[c] = true;
            let (x, y) = centre(c);
            s.push_str(&format!(r#"<circle {fill}cx="{x}" cy="{y}"/>"#));
            points.push_str(&format!("{x} {y} "));
        }
        // Close the loop only when the walk came back to its start.
        let closed = cycle.last().and_then(|&c| board.get(c)) == Some(start);
        if closed {
            let (x, y) = centre(start);
            points.push_str(&format!("{x} {y}"));
        }
        s.push_str(&format!(r#"<polyline {stroke}points="{}"/>"#, points.trim_end()));
    }

    s.push_str("</svg>\n");
    Ok(s)
}

pub fn write_svg<R: Rng + ?Sized>(board: &Board, path: &Path, rng: &mut R) -> Result<()> {
    let svg = render_svg(board, rng)?;
    let f = fs::File::create(path).map_err(io_error("svg_create", path))?;
    let mut w = BufWriter::new(f);
    w.write_all(svg.as_bytes()).map_err(io_error("svg_write", path))?;
    w.flush().map_err(io_error("svg_flush", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::tiles::base_tile;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn one_polyline_per_cycle() {
        let mut rng = StdRng::seed_from_u64(0);
        let tour = render_svg(&base_tile(6, 6).unwrap(), &mut rng).unwrap();
        assert_eq!(tour.matches("<polyline").count(), 1);
        assert_eq!(tour.matches("<circle").count(), 36);
        assert!(!tour.contains("rgb("));

        let mut directed = base_tile(6, 6).unwrap();
        directed.make_directed();
        assert!(render_svg(&directed, &mut rng).is_err());
    }

    #[test]
    fn several_cycles_are_coloured() {
        let mut rng = StdRng::seed_from_u64(0);
        let b = Board::from_moves(&crate::generate::braid::CENTRE_4X4, 4, 4).unwrap();
        let svg = render_svg(&b, &mut rng).unwrap();
        assert_eq!(svg.matches("<polyline").count(), 4);
        assert!(svg.contains("stroke:rgb("));
        assert!(svg.ends_with("</svg>\n"));
    }
}
