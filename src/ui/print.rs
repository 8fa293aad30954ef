use fltk::{
    draw,
    enums::Color,
    printer::Printer,
};

use crate::app::domain::{CharFormat, RichDocument};
use crate::app::error::Result;
use crate::app::infrastructure::style_map::{fltk_color, font_for};
use crate::app::services::print_layout::{Page, paginate, selected_pages};

/// Margin inside the printable area, in points.
const MARGIN: i32 = 36;

/// Print the document through the native print dialog.
///
/// A cancelled dialog is not an error: nothing is printed and `Ok` returns.
/// FLTK reports cancel and a missing printer the same way, so both are logged
/// and neither raises an alert. Only the page range picked in the dialog is
/// printed.
pub fn print_document(doc: &RichDocument, base_size: u32) -> Result<()> {
    let mut printer = Printer::default();
    let (from, to) = match printer.begin_job(0) {
        Ok(range) => range,
        Err(e) => {
            log::warn!("Print job not started (cancelled or no printer): {}", e);
            return Ok(());
        }
    };

    let (width, height) = printer.printable_rect();
    let page_width = f64::from(width - 2 * MARGIN);
    let page_height = f64::from(height - 2 * MARGIN);
    let pages = paginate(doc, page_width, page_height, |text, fmt| {
        let (font, size) = font_for(fmt, base_size);
        draw::set_font(font, size);
        (draw::width(text), f64::from(draw::height()))
    });

    let selected = selected_pages(pages.len(), from, to);
    let count = selected.len();
    for page in &pages[selected] {
        if let Err(e) = print_page(&mut printer, page, base_size) {
            printer.end_job();
            return Err(e);
        }
    }
    printer.end_job();
    log::info!("Printed {} page(s)", count);
    Ok(())
}

fn print_page(printer: &mut Printer, page: &Page, base_size: u32) -> Result<()> {
    printer.begin_page()?;
    let mut y = MARGIN;
    for line in &page.lines {
        let height = line.height.ceil() as i32;
        for frag in &line.fragments {
            draw_fragment(&frag.text, &frag.format, MARGIN + frag.x.round() as i32, y + height, frag.width, base_size);
        }
        y += height;
    }
    printer.end_page()?;
    Ok(())
}

/// Draw one fragment with its baseline at `baseline`.
fn draw_fragment(text: &str, fmt: &CharFormat, x: i32, baseline: i32, width: f64, base_size: u32) {
    let (font, size) = font_for(fmt, base_size);
    draw::set_font(font, size);
    let color = fmt.color.map(fltk_color).unwrap_or(Color::Black);
    draw::set_draw_color(color);
    let y = baseline - draw::descent();
    draw::draw_text(text, x, y);
    if fmt.underline {
        let under = y + 1;
        draw::draw_line(x, under, x + width.round() as i32, under);
    }
}
