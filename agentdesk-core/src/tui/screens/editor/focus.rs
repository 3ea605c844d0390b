use crate::editor::{EditorForm, TextField, ToolList};

/// One selectable row of the form pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRef {
    Text(TextField),
    Follow(usize),
    AddFollow,
    ToolItem { list: ToolList, tool: usize },
    Param { list: ToolList, tool: usize, param: usize },
    AddParam { list: ToolList, tool: usize },
    AddTool(ToolList),
}

impl FieldRef {
    /// Rows that open a text input on Enter.
    pub fn is_editable(self) -> bool {
        matches!(
            self,
            FieldRef::Text(_)
                | FieldRef::Follow(_)
                | FieldRef::ToolItem { .. }
                | FieldRef::Param { .. }
        )
    }

    /// Free-text fields that may span several lines.
    pub fn is_multiline(self) -> bool {
        matches!(self, FieldRef::Text(field) if !matches!(field, TextField::Id | TextField::Name))
    }

    /// Rows that can be removed from their list.
    pub fn is_removable(self) -> bool {
        matches!(
            self,
            FieldRef::Follow(_) | FieldRef::ToolItem { .. } | FieldRef::Param { .. }
        )
    }

    pub fn label(self) -> String {
        match self {
            FieldRef::Text(field) => field.label().to_string(),
            FieldRef::Follow(i) => format!("Follow #{}", i + 1),
            FieldRef::AddFollow => "+ Add account to follow".to_string(),
            FieldRef::ToolItem { tool, .. } => format!("Tool #{}", tool + 1),
            FieldRef::Param { param, .. } => format!("Param #{}", param + 1),
            FieldRef::AddParam { .. } => "+ Add param".to_string(),
            FieldRef::AddTool(ToolList::X) => "+ Add X tool".to_string(),
            FieldRef::AddTool(ToolList::Telegram) => "+ Add Telegram tool".to_string(),
        }
    }
}

/// Flattens the form into rows, in display order. Channel sections appear
/// only for channels the agent has.
pub fn field_rows(form: &EditorForm) -> Vec<FieldRef> {
    let mut rows = vec![
        FieldRef::Text(TextField::Id),
        FieldRef::Text(TextField::Behavior),
        FieldRef::Text(TextField::Name),
        FieldRef::Text(TextField::Persona),
        FieldRef::Text(TextField::Style),
    ];

    if form.x.is_some() {
        rows.push(FieldRef::Text(TextField::XPrompt));
        rows.extend((0..form.follow().len()).map(FieldRef::Follow));
        rows.push(FieldRef::AddFollow);
        push_tool_rows(form, ToolList::X, &mut rows);
    }

    if form.telegram.is_some() {
        rows.push(FieldRef::Text(TextField::TgPrompt));
        rows.push(FieldRef::Text(TextField::TgFirstMessage));
        rows.push(FieldRef::Text(TextField::ChatMessage));
        push_tool_rows(form, ToolList::Telegram, &mut rows);
    }

    rows
}

fn push_tool_rows(form: &EditorForm, list: ToolList, rows: &mut Vec<FieldRef>) {
    for (tool, entry) in form.tools(list).iter().enumerate() {
        rows.push(FieldRef::ToolItem { list, tool });
        rows.extend((0..entry.params.len()).map(|param| FieldRef::Param { list, tool, param }));
        rows.push(FieldRef::AddParam { list, tool });
    }
    rows.push(FieldRef::AddTool(list));
}

/// Current text of an editable row.
pub(super) fn field_value(form: &EditorForm, field: FieldRef) -> Option<String> {
    match field {
        FieldRef::Text(text) => form.text(text).map(str::to_string),
        FieldRef::Follow(i) => form.follow().get(i).cloned(),
        FieldRef::ToolItem { list, tool } => form.tools(list).get(tool).map(|t| t.item.clone()),
        FieldRef::Param { list, tool, param } => form
            .tools(list)
            .get(tool)
            .and_then(|t| t.params.get(param))
            .cloned(),
        _ => None,
    }
}
