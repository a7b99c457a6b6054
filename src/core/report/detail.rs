//! Single-student detail sheet

use super::document::{Block, Document, PageCursor, Row, Table, MISSING_VALUE};
use super::generated_on_label;
use crate::core::models::{format_number, FieldGroup, Student};
use chrono::NaiveDate;

/// Lay out the detail sheet of `student`
///
/// One grouped table covers every field; there is no per-snapshot repetition.
#[must_use]
pub fn build_detail(student: &Student, page_height: f32, today: NaiveDate) -> Document {
    let title = format!("Ficha de Avaliação - {}", student.name);
    let mut cursor = PageCursor::new(page_height);
    cursor.push(Block::Title(title.clone()), PageCursor::TITLE_STEP);
    cursor.push(
        Block::Subtitle(format!("Telefone: {}", student.phone)),
        PageCursor::ROW_HEIGHT,
    );
    cursor.push(
        Block::Subtitle(format!("Status: {}", student.status_label())),
        PageCursor::ROW_HEIGHT,
    );
    cursor.push(Block::Table(grouped_table(student)), 0.0);
    cursor.push(Block::Footer(generated_on_label(today)), 0.0);

    Document {
        title,
        file_stem: file_stem(student),
        pages: cursor.finish(),
    }
}

/// `aluno_{nome}_{id}`
#[must_use]
pub fn file_stem(student: &Student) -> String {
    format!("aluno_{}_{}", student.file_stem_name(), student.id)
}

fn grouped_table(student: &Student) -> Table {
    let mut rows = Vec::new();
    for group in FieldGroup::ALL {
        rows.push(Row::Group(group.title().to_string()));
        if group == FieldGroup::BasicInfo {
            rows.push(Row::entry("Telefone", student.phone.clone()));
        }
        for field in group.fields() {
            let value = student
                .measurements
                .get(*field)
                .map_or_else(|| MISSING_VALUE.to_string(), format_number);
            rows.push(Row::entry(field.label_with_unit(), value));
        }
    }
    Table { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::MeasurementField;

    fn student() -> Student {
        serde_json::from_value(serde_json::json!({
            "id": 12,
            "nome": "Maria Clara",
            "telefone": "(11) 99999-0000",
            "ativo": false,
            "peso": 62.5,
            "kcal": "1450"
        }))
        .unwrap()
    }

    #[test]
    fn test_header_and_groups() {
        let doc = build_detail(&student(), 297.0, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        let blocks = &doc.pages[0].blocks;
        assert_eq!(blocks[0], Block::Title("Ficha de Avaliação - Maria Clara".into()));
        assert_eq!(blocks[1], Block::Subtitle("Telefone: (11) 99999-0000".into()));
        assert_eq!(blocks[2], Block::Subtitle("Status: Inativo".into()));

        let table = doc.tables()[0];
        let groups: Vec<_> = table
            .rows
            .iter()
            .filter_map(|r| match r {
                Row::Group(g) => Some(g.as_str()),
                Row::Entry { .. } => None,
            })
            .collect();
        assert_eq!(
            groups,
            ["Informações Básicas", "Antropometria", "Bioimpedância e Metabolismo"]
        );
        // phone plus every measurement field
        assert_eq!(table.entries().count(), MeasurementField::ALL.len() + 1);
        assert_eq!(table.value_of("Peso (kg)"), Some("62.5"));
        assert_eq!(table.value_of("Kcal Basal (kcal/dia)"), Some("1450"));
        assert_eq!(table.value_of("Busto (cm)"), Some("N/A"));
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem(&student()), "aluno_Maria_Clara_12");
    }
}
