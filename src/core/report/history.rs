//! Multi-snapshot evolution-history report

use super::document::{Block, Document, PageCursor, Row, Table, MISSING_VALUE};
use super::generated_on_label;
use crate::core::evolution::{FilterSelection, SortOrder, Timeline};
use crate::core::models::{format_number, MeasurementField, Snapshot, Student};
use chrono::NaiveDate;

/// Notice emitted when no snapshot matches the filter
pub const EMPTY_NOTICE: &str = "Nenhuma avaliação encontrada para os filtros.";

/// Builds the history report of one student
#[derive(Debug, Clone)]
pub struct HistoryReport<'a> {
    student: &'a Student,
    timeline: &'a Timeline,
    selection: FilterSelection,
    page_height: f32,
}

impl<'a> HistoryReport<'a> {
    /// Report over `timeline` narrowed by `selection`
    #[must_use]
    pub const fn new(
        student: &'a Student,
        timeline: &'a Timeline,
        selection: FilterSelection,
        page_height: f32,
    ) -> Self {
        Self {
            student,
            timeline,
            selection,
            page_height,
        }
    }

    /// Lay out the document; `today` is stamped in the footer
    #[must_use]
    pub fn build(&self, today: NaiveDate) -> Document {
        let filtered = self.timeline.filter(self.selection);
        let sections = filtered.sorted(SortOrder::NewestFirst);
        let name = if self.student.name.trim().is_empty() {
            "Aluno"
        } else {
            self.student.name.as_str()
        };
        let title = format!("Histórico de Evolução | {name}");

        let mut cursor = PageCursor::new(self.page_height);
        cursor.push(Block::Title(title.clone()), PageCursor::TITLE_STEP);
        cursor.push(
            Block::Subtitle(format!("Filtros aplicados: {}", self.selection.describe())),
            PageCursor::TITLE_STEP,
        );

        if sections.is_empty() {
            cursor.push(Block::Notice(EMPTY_NOTICE.to_string()), 0.0);
        }

        let last = sections.len().saturating_sub(1);
        for (index, snapshot) in sections.iter().enumerate() {
            let date = filtered.long_date(snapshot);
            let heading = if index == 0 {
                format!("Avaliação de {date} (Mais Recente)")
            } else {
                format!("Avaliação de {date}")
            };
            cursor.push_section(heading, measurement_table(snapshot));

            if cursor.is_near_bottom() && index < last {
                cursor.break_page();
            }
        }

        cursor.push(Block::Footer(generated_on_label(today)), 0.0);
        Document {
            title,
            file_stem: file_stem(self.student),
            pages: cursor.finish(),
        }
    }
}

/// `historico_evolucao_{nome}_{id}`
#[must_use]
pub fn file_stem(student: &Student) -> String {
    format!(
        "historico_evolucao_{}_{}",
        student.file_stem_name(),
        student.id
    )
}

/// Every measurement field of `snapshot`, `N/A` where absent
fn measurement_table(snapshot: &Snapshot) -> Table {
    let rows = MeasurementField::ALL
        .into_iter()
        .map(|field| {
            let value = snapshot
                .measurements
                .get(field)
                .map_or_else(|| MISSING_VALUE.to_string(), format_number);
            Row::entry(field.label_with_unit(), value)
        })
        .collect();
    Table { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Measurements, Timestamp};
    use chrono::FixedOffset;

    fn student() -> Student {
        serde_json::from_value(serde_json::json!({"id": 5, "nome": "João Lima"})).unwrap()
    }

    fn timeline(n: u32) -> Timeline {
        let snaps = (1..=n)
            .map(|d| {
                let mut m = Measurements::default();
                m.weight = Some(80.0 - f64::from(d));
                Snapshot::new(
                    i64::from(d),
                    Timestamp::from(NaiveDate::from_ymd_opt(2024, 1, d).unwrap()),
                    m,
                )
            })
            .collect();
        Timeline::new(snaps, FixedOffset::east_opt(0).unwrap())
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_sections_newest_first_with_marker() {
        let s = student();
        let t = timeline(3);
        let doc = HistoryReport::new(&s, &t, FilterSelection::all(), 297.0).build(today());
        assert_eq!(
            doc.headings(),
            [
                "Avaliação de 03/01/2024 (Mais Recente)",
                "Avaliação de 02/01/2024",
                "Avaliação de 01/01/2024",
            ]
        );
        assert_eq!(doc.tables()[0].value_of("Peso (kg)"), Some("77"));
        assert_eq!(doc.tables()[0].value_of("Musculatura (%)"), Some("N/A"));
    }

    #[test]
    fn test_two_sections_per_a4_page() {
        let s = student();
        let t = timeline(5);
        let doc = HistoryReport::new(&s, &t, FilterSelection::all(), 297.0).build(today());
        let per_page: Vec<usize> = doc
            .pages
            .iter()
            .map(|p| p.blocks.iter().filter(|b| matches!(b, Block::Heading(_))).count())
            .collect();
        assert_eq!(per_page, [2, 2, 1]);
        // footer lands on the final page only
        let last = doc.pages.last().unwrap();
        assert!(matches!(last.blocks.last(), Some(Block::Footer(f)) if f == "Gerado em: 01/06/2024"));
    }

    #[test]
    fn test_no_blank_trailing_page() {
        let s = student();
        let t = timeline(2);
        let doc = HistoryReport::new(&s, &t, FilterSelection::all(), 297.0).build(today());
        assert_eq!(doc.pages.len(), 1);
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem(&student()), "historico_evolucao_João_Lima_5");
    }
}
