//! Rasterization of elements into a canvas.
//!
//! Cell layout written by [`draw_element`], for an element's row:
//!
//! ```text
//! leftmost cell:  <color escape><content> 0 0 ... 0
//! inner cells:    <content> 0 0 ... 0
//! last cell:      <content> 0 ... 0 <reset>
//! ```
//!
//! Every touched cell is cleared first, so redrawing the same element over
//! the same canvas leaves it byte-for-byte unchanged.

use log::trace;

use crate::color::RESET;
use crate::element::{Element, LINE_SEPARATOR, Overflow};
use crate::error::DrawError;
use crate::geometry::{Geometry, SPACE};

/// Draw every element in order, stopping at the first failure.
///
/// Zero width or height is resolved to the canvas edge first. Elements drawn
/// before a failure stay on the canvas.
pub fn draw_all(
    elements: &[Element],
    canvas: &mut [u8],
    geometry: &Geometry,
) -> Result<(), DrawError> {
    for (i, element) in elements.iter().enumerate() {
        let element = element.fitted(geometry);
        trace!(
            "drawing element {} at ({}, {}) size {}x{}",
            i, element.x, element.y, element.width, element.height
        );
        draw_element(&element, canvas, geometry)?;
    }
    Ok(())
}

/// Draw a single element into `canvas`.
///
/// Dimensions are taken literally: a zero-sized element is validated but
/// draws nothing.
///
/// # Errors
/// - [`DrawError::CanvasNotSet`] if the canvas is empty or the geometry has
///   no row size.
/// - [`DrawError::DoesNotFitVertically`] if the element extends below the
///   last row the canvas holds.
/// - [`DrawError::DoesNotFitHorizontally`] if the element extends past the
///   end of the row.
pub fn draw_element(
    element: &Element,
    canvas: &mut [u8],
    geometry: &Geometry,
) -> Result<(), DrawError> {
    let row_size = geometry.row_size();
    let col_size = geometry.col_size();

    if canvas.is_empty() || row_size == 0 {
        return Err(DrawError::CanvasNotSet);
    }

    let rows = canvas.len() / row_size;
    let bottom = element.y.saturating_add(element.height);
    if bottom > rows {
        return Err(DrawError::DoesNotFitVertically { bottom, rows });
    }

    // (right * col_size) - 1 > row_size, without underflow at zero.
    // Checked per row, so an element with no rows never fails it.
    let right = element.x.saturating_add(element.width);
    if element.height > 0 && right.saturating_mul(col_size) > row_size + 1 {
        return Err(DrawError::DoesNotFitHorizontally {
            right,
            cols: row_size / col_size,
        });
    }

    if element.width == 0 {
        return Ok(());
    }

    let mut brush = Brush {
        canvas,
        geometry,
        element,
        left: element.x,
        right,
    };

    let mut cursor = 0;
    for y in element.y..bottom {
        let edge_row = y == element.y || y == bottom - 1;
        if element.padding && edge_row {
            brush.blank_row(y);
        } else {
            cursor = brush.content_row(y, cursor);
        }
        brush.close_row(y);
    }

    Ok(())
}

/// Writes one element's cells. Bounds were validated by `draw_element`.
struct Brush<'a> {
    canvas: &'a mut [u8],
    geometry: &'a Geometry,
    element: &'a Element,
    left: usize,
    right: usize,
}

impl Brush<'_> {
    /// Clear cell `(x, y)` and write its content byte, prefixed with the
    /// color escape on the leftmost column.
    fn put(&mut self, x: usize, y: usize, content: u8) {
        let start = self.geometry.cell_index(x, y);
        let cell = &mut self.canvas[start..start + self.geometry.col_size()];
        cell.fill(0);

        if x == self.left {
            let paint = self.element.color.escape();
            cell[..paint.len()].copy_from_slice(paint);
            cell[paint.len()] = content;
        } else {
            cell[0] = content;
        }
    }

    fn blank_row(&mut self, y: usize) {
        for x in self.left..self.right {
            self.put(x, y, SPACE);
        }
    }

    /// Lay out value bytes from `cursor` across row `y`.
    ///
    /// Returns the cursor the next row starts from.
    fn content_row(&mut self, y: usize, mut cursor: usize) -> usize {
        let element = self.element;
        let value = element.value.as_slice();
        let mut line_ended = false;

        for x in self.left..self.right {
            if !line_ended && value.get(cursor) == Some(&LINE_SEPARATOR) {
                line_ended = true;
            }

            let padding_cell = element.padding && (x == self.left || x == self.right - 1);
            let content = if line_ended || padding_cell || cursor >= value.len() {
                SPACE
            } else {
                cursor += 1;
                value[cursor - 1]
            };

            self.put(x, y, content);
        }

        // A separator right at the cursor ends this row's line, whether it
        // stopped the row early or the line filled the row exactly.
        match value.get(cursor) {
            Some(&LINE_SEPARATOR) => cursor + 1,
            _ if element.overflow == Overflow::Truncate => skip_line(value, cursor),
            _ => cursor,
        }
    }

    /// Overwrite the tail of the row's last cell with the reset sequence.
    fn close_row(&mut self, y: usize) {
        let end = self.geometry.cell_index(self.right - 1, y) + self.geometry.col_size();
        self.canvas[end - RESET.len()..end].copy_from_slice(RESET);
    }
}

/// Position just past the next line separator, or the end of `value`.
fn skip_line(value: &[u8], cursor: usize) -> usize {
    value[cursor..]
        .iter()
        .position(|&b| b == LINE_SEPARATOR)
        .map_or(value.len(), |i| cursor + i + 1)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::geometry::CELL_SIZE;

    /// One 15-byte cell: `head` at the start, `tail` at the end, zeros between.
    fn cell(head: &[u8], tail: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; CELL_SIZE];
        out[..head.len()].copy_from_slice(head);
        out[CELL_SIZE - tail.len()..].copy_from_slice(tail);
        out
    }

    /// Content bytes of row `y` of `el`, skipping the leftmost color escape.
    fn glyphs(canvas: &[u8], g: &Geometry, el: &Element, y: usize) -> Vec<u8> {
        (el.x..el.x + el.width)
            .map(|x| {
                let start = g.cell_index(x, y);
                if x == el.x {
                    canvas[start + el.color.escape().len()]
                } else {
                    canvas[start]
                }
            })
            .collect()
    }

    // --- Errors ---

    #[test]
    fn empty_canvas_is_not_set() {
        let el = Element::new("testing").colored(Color::FgBlack);
        let mut canvas: Vec<u8> = Vec::new();

        let err = draw_element(&el, &mut canvas, &Geometry::default()).unwrap_err();
        assert_eq!(err, DrawError::CanvasNotSet);
        assert!(canvas.is_empty());
    }

    #[test]
    fn zero_row_size_is_not_set() {
        let el = Element::new("testing");
        let mut canvas = vec![0u8; 30];

        let err = draw_element(&el, &mut canvas, &Geometry::default()).unwrap_err();
        assert_eq!(err, DrawError::CanvasNotSet);
        assert!(canvas.iter().all(|&b| b == 0));
    }

    #[test]
    fn too_tall_does_not_fit_vertically() {
        let g = Geometry::new(2, 8);
        let mut canvas = g.canvas();
        let before = canvas.clone();

        let el = Element::new("x").at(0, 1).sized(4, 2);
        let err = draw_element(&el, &mut canvas, &g).unwrap_err();

        assert_eq!(err, DrawError::DoesNotFitVertically { bottom: 3, rows: 2 });
        assert_eq!(canvas, before);
    }

    #[test]
    fn too_wide_does_not_fit_horizontally() {
        let g = Geometry::new(2, 8);
        let mut canvas = g.canvas();

        let el = Element::new("x").at(5, 0).sized(4, 1);
        let err = draw_element(&el, &mut canvas, &g).unwrap_err();
        assert_eq!(err, DrawError::DoesNotFitHorizontally { right: 9, cols: 8 });

        let padded = Element::new("x").sized(9, 2).padded();
        let err = draw_element(&padded, &mut canvas, &g).unwrap_err();
        assert_eq!(err, DrawError::DoesNotFitHorizontally { right: 9, cols: 8 });
    }

    #[test]
    fn zero_height_is_never_too_wide() {
        let g = Geometry::new(2, 4);
        let mut canvas = g.canvas();
        let before = canvas.clone();

        let el = Element::new("x").at(3, 0).sized(5, 0);
        draw_element(&el, &mut canvas, &g).unwrap();

        assert_eq!(canvas, before);
    }

    #[test]
    fn element_flush_with_the_edges_fits() {
        let g = Geometry::new(2, 8);
        let mut canvas = g.canvas();
        let el = Element::new("x").sized(8, 2);
        assert!(draw_element(&el, &mut canvas, &g).is_ok());
    }

    // --- Byte-exact layouts ---

    #[test]
    fn single_cell_without_color() {
        let g = Geometry::new(1, 1);
        let mut canvas = vec![0u8; CELL_SIZE];
        let el = Element::new("testing");

        draw_element(&el, &mut canvas, &g).unwrap();

        let expected = [
            0x1b, 0x5b, 0x30, 0x6d, 0x74, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x1b, 0x5b, 0x30, 0x6d,
        ];
        assert_eq!(canvas, expected);
    }

    #[test]
    fn single_cell_with_color() {
        let g = Geometry::new(1, 1);
        let mut canvas = vec![0u8; CELL_SIZE];
        let el = Element::new("testing").colored(Color::FgBlack);

        draw_element(&el, &mut canvas, &g).unwrap();

        let expected = [
            0x1b, 0x5b, 0x30, 0x3b, 0x33, 0x30, 0x6d, 0x74, 0x0, 0x0, 0x0, 0x1b, 0x5b, 0x30, 0x6d,
        ];
        assert_eq!(canvas, expected);
    }

    #[test]
    fn two_rows_split_by_separator() {
        let g = Geometry::new(2, 8);
        let mut canvas = vec![0u8; 240];
        let el = Element::new("testing\ntesting1")
            .sized(8, 2)
            .colored(Color::BgBlue);

        draw_element(&el, &mut canvas, &g).unwrap();

        let blue = b"\x1b[0;44m";
        let mut expected = Vec::new();
        // row 0: "testing" then a blank where the separator was
        expected.extend(cell(&[blue.as_slice(), b"t".as_slice()].concat(), b""));
        for &b in b"esting" {
            expected.extend(cell(&[b], b""));
        }
        expected.extend(cell(b" ", RESET));
        // row 1: "testing1"
        expected.extend(cell(&[blue.as_slice(), b"t".as_slice()].concat(), b""));
        for &b in b"esting" {
            expected.extend(cell(&[b], b""));
        }
        expected.extend(cell(b"1", RESET));

        assert_eq!(canvas.len(), expected.len());
        assert_eq!(canvas, expected);
    }

    // --- Properties ---

    #[test]
    fn every_row_starts_with_the_color_and_ends_with_reset() {
        let g = Geometry::new(6, 10);
        let mut canvas = g.canvas();
        let el = Element::new("one\ntwo\nthree")
            .at(2, 1)
            .sized(5, 4)
            .colored(Color::BgHiMagenta);

        draw_element(&el, &mut canvas, &g).unwrap();

        let paint = Color::BgHiMagenta.escape();
        for y in 1..5 {
            let first = g.cell_index(2, y);
            assert_eq!(&canvas[first..first + paint.len()], paint, "row {}", y);

            let end = g.cell_index(6, y) + CELL_SIZE;
            assert_eq!(&canvas[end - RESET.len()..end], RESET, "row {}", y);
        }
    }

    #[test]
    fn drawing_twice_is_idempotent() {
        let g = Geometry::new(4, 12);
        let el = Element::new("idempotent\ndraw")
            .at(1, 1)
            .sized(10, 3)
            .colored(Color::FgGreen)
            .padded();

        let mut once = g.canvas();
        draw_element(&el, &mut once, &g).unwrap();

        let mut twice = g.canvas();
        draw_element(&el, &mut twice, &g).unwrap();
        draw_element(&el, &mut twice, &g).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn padding_rows_hold_only_blanks() {
        let g = Geometry::new(5, 6);
        let mut canvas = g.canvas();
        let el = Element::new("abcdefghijkl")
            .sized(6, 4)
            .colored(Color::BgGreen)
            .padded();

        draw_element(&el, &mut canvas, &g).unwrap();

        assert_eq!(glyphs(&canvas, &g, &el, 0), b"      ");
        assert_eq!(glyphs(&canvas, &g, &el, 3), b"      ");
        // left and right padding columns on content rows
        assert_eq!(glyphs(&canvas, &g, &el, 1), b" abcd ");
        assert_eq!(glyphs(&canvas, &g, &el, 2), b" efgh ");
    }

    #[test]
    fn padding_rows_still_carry_color_and_reset() {
        let g = Geometry::new(3, 4);
        let mut canvas = g.canvas();
        let el = Element::new("x").sized(4, 3).colored(Color::BgRed).padded();

        draw_element(&el, &mut canvas, &g).unwrap();

        let paint = Color::BgRed.escape();
        assert_eq!(&canvas[..paint.len()], paint);
        assert_eq!(canvas[paint.len()], SPACE);
        assert_eq!(&canvas[g.row_size() - RESET.len()..g.row_size()], RESET);
    }

    #[test]
    fn separator_blanks_rest_of_row_without_shifting_next_row() {
        let g = Geometry::new(3, 4);
        let mut canvas = g.canvas();
        let el = Element::new("ab\ncd\n\nef").sized(4, 3);

        draw_element(&el, &mut canvas, &g).unwrap();

        assert_eq!(glyphs(&canvas, &g, &el, 0), b"ab  ");
        assert_eq!(glyphs(&canvas, &g, &el, 1), b"cd  ");
        // the empty line renders as a blank row
        assert_eq!(glyphs(&canvas, &g, &el, 2), b"    ");
    }

    #[test]
    fn separator_in_first_column_still_paints_the_row() {
        let g = Geometry::new(2, 3);
        let mut canvas = g.canvas();
        let el = Element::new("\nabc").sized(3, 2).colored(Color::FgCyan);

        draw_element(&el, &mut canvas, &g).unwrap();

        let paint = Color::FgCyan.escape();
        assert_eq!(&canvas[..paint.len()], paint);
        assert_eq!(glyphs(&canvas, &g, &el, 0), b"   ");
        assert_eq!(glyphs(&canvas, &g, &el, 1), b"abc");
    }

    #[test]
    fn continue_overflow_carries_into_next_row() {
        let g = Geometry::new(3, 3);
        let mut canvas = g.canvas();
        let el = Element::new("abcdefg").sized(3, 3);

        draw_element(&el, &mut canvas, &g).unwrap();

        assert_eq!(glyphs(&canvas, &g, &el, 0), b"abc");
        assert_eq!(glyphs(&canvas, &g, &el, 1), b"def");
        assert_eq!(glyphs(&canvas, &g, &el, 2), b"g  ");
    }

    #[test]
    fn truncate_overflow_drops_rest_of_line() {
        let g = Geometry::new(3, 3);
        let mut canvas = g.canvas();
        let el = Element::new("abcdef\ngh\nijklm").sized(3, 3).truncating();

        draw_element(&el, &mut canvas, &g).unwrap();

        assert_eq!(glyphs(&canvas, &g, &el, 0), b"abc");
        assert_eq!(glyphs(&canvas, &g, &el, 1), b"gh ");
        assert_eq!(glyphs(&canvas, &g, &el, 2), b"ijk");
    }

    #[test]
    fn truncate_without_separator_blanks_following_rows() {
        let g = Geometry::new(2, 3);
        let mut canvas = g.canvas();
        let el = Element::new("abcdef").sized(3, 2).truncating();

        draw_element(&el, &mut canvas, &g).unwrap();

        assert_eq!(glyphs(&canvas, &g, &el, 0), b"abc");
        assert_eq!(glyphs(&canvas, &g, &el, 1), b"   ");
    }

    #[test]
    fn line_exactly_as_wide_as_element_does_not_leave_blank_row() {
        let g = Geometry::new(2, 3);
        let mut canvas = g.canvas();
        let el = Element::new("abc\ndef").sized(3, 2);

        draw_element(&el, &mut canvas, &g).unwrap();

        assert_eq!(glyphs(&canvas, &g, &el, 0), b"abc");
        assert_eq!(glyphs(&canvas, &g, &el, 1), b"def");
    }

    #[test]
    fn exhausted_value_pads_with_spaces() {
        let g = Geometry::new(1, 5);
        let mut canvas = vec![0u8; g.row_size()];
        let el = Element::new("ab").sized(5, 1);

        draw_element(&el, &mut canvas, &g).unwrap();

        assert_eq!(glyphs(&canvas, &g, &el, 0), b"ab   ");
    }

    #[test]
    fn zero_width_draws_nothing() {
        let g = Geometry::new(2, 4);
        let mut canvas = g.canvas();
        let before = canvas.clone();

        let el = Element::new("abc").sized(0, 2);
        draw_element(&el, &mut canvas, &g).unwrap();

        assert_eq!(canvas, before);
    }

    #[test]
    fn cells_outside_the_element_are_untouched() {
        let g = Geometry::new(3, 6);
        let mut canvas = g.canvas();
        let before = canvas.clone();
        let el = Element::new("hi").at(2, 1).sized(2, 1).colored(Color::BgYellow);

        draw_element(&el, &mut canvas, &g).unwrap();

        let start = g.cell_index(2, 1);
        let end = g.cell_index(4, 1);
        assert_eq!(canvas[..start], before[..start]);
        assert_eq!(canvas[end..], before[end..]);
    }

    // --- List drawing ---

    #[test]
    fn draw_all_paints_in_order_last_wins() {
        let g = Geometry::new(1, 4);
        let mut canvas = g.canvas();
        let under = Element::new("aaaa").sized(4, 1);
        let over = Element::new("b").at(1, 0).sized(1, 1);

        draw_all(&[under, over.clone()], &mut canvas, &g).unwrap();

        assert_eq!(glyphs(&canvas, &g, &over, 0), b"b");
        assert_eq!(canvas[RESET.len()], b'a');
        assert_eq!(canvas[g.cell_index(2, 0)], b'a');
        assert_eq!(canvas[g.cell_index(3, 0)], b'a');
    }

    #[test]
    fn draw_all_stops_at_first_error_and_keeps_earlier_draws() {
        let g = Geometry::new(2, 4);
        let mut canvas = g.canvas();
        let first = Element::new("ok").sized(2, 1);
        let broken = Element::new("no").at(3, 0).sized(2, 1);
        let never = Element::new("zz").at(0, 1).sized(2, 1);

        let err = draw_all(&[first.clone(), broken, never.clone()], &mut canvas, &g).unwrap_err();

        assert_eq!(err, DrawError::DoesNotFitHorizontally { right: 5, cols: 4 });
        assert_eq!(glyphs(&canvas, &g, &first, 0), b"ok");
        // the third element never ran
        assert_eq!(&canvas[g.cell_index(0, 1)..g.cell_index(2, 1)], &g.canvas()[..2 * CELL_SIZE]);
    }

    #[test]
    fn draw_all_extends_zero_dimensions_to_the_edge() {
        let g = Geometry::new(3, 5);
        let mut canvas = g.canvas();
        let bar = Element::new("status").at(0, 2).sized(0, 1).colored(Color::BgBlue);

        draw_all(std::slice::from_ref(&bar), &mut canvas, &g).unwrap();

        let resolved = bar.fitted(&g).into_owned();
        assert_eq!(glyphs(&canvas, &g, &resolved, 2), b"statu");
        let end = g.cell_index(4, 2) + CELL_SIZE;
        assert_eq!(&canvas[end - RESET.len()..end], RESET);
    }

    #[test]
    fn draw_all_on_empty_canvas_is_not_set() {
        let mut canvas = Vec::new();
        let err = draw_all(&[Element::new("x")], &mut canvas, &Geometry::default()).unwrap_err();
        assert_eq!(err, DrawError::CanvasNotSet);
    }
}
