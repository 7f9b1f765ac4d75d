use chrono::NaiveDate;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;
use salesdash_core::{Aggregator, Cleaner, SalesRecord, SalesTable};
use salesdash_tui::{ChartData, ChartOptions, Figure, FigureView, Theme};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

fn text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buf.cell((x, y)).unwrap().symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn figures_draw_from_a_real_summary() {
    let records = [
        SalesRecord::new(day(1), "Widget ", 3.0, 10.0),
        SalesRecord::new(day(1), "widget", 2.0, 10.0),
        SalesRecord::new(day(2), " Gadget", 4.0, 2.5),
        SalesRecord::new(day(4), "gizmo", 1.0, 7.0),
    ];
    let (cleaned, _) = Cleaner::clean(SalesTable::from_records(&records).unwrap()).unwrap();
    let summary = Aggregator::summarize(&Aggregator::derive_totals(&cleaned).unwrap());
    let options = ChartOptions::default();
    let data = ChartData {
        summary: &summary,
        options: &options,
    };
    let theme = Theme::default();

    let mut terminal = Terminal::new(TestBackend::new(120, 32)).unwrap();
    for (i, figure) in Figure::ALL.iter().enumerate() {
        terminal
            .draw(|f| {
                let view =
                    FigureView::new(*figure, data, &theme).position(i + 1, Figure::ALL.len());
                f.render_widget(view, f.area());
            })
            .unwrap();
        let screen = text(terminal.backend().buffer());

        match figure {
            Figure::StackedDaily => {
                assert!(screen.contains("Product"));
                assert!(screen.contains("widget"));
                assert!(screen.contains("2024-01-01"));
            }
            Figure::ProductAndDaily => {
                assert!(screen.contains("gadget"));
                assert!(screen.contains("gizmo"));
                assert!(screen.contains("2024-01-04"));
            }
        }
    }
}
