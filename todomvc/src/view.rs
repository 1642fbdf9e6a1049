//! Render tree for the todo list.
//!
//! Markup follows the TodoMVC app template so its stylesheet applies as-is.
//! Interactive elements carry `data-live-*` bindings naming the events in
//! [`crate::event::names`].

use crate::TODOS_PATH;
use crate::component::TodosState;
use crate::event::names;
use crate::store::ValidationError;
use crate::types::{Filter, Todo};
use liveview_core::{Element, Node};

/// The whole app: header, then main and footer when anything is visible.
#[must_use]
pub fn todo_app(state: &TodosState) -> Node {
    let has_todos = !state.visible_todos.is_empty();

    Element::new("section")
        .class("todoapp")
        .child(header(state.add_error))
        .child_if(has_todos, || main_section(state))
        .child_if(has_todos, || footer(state.visible_todos.len(), state.filter))
        .into()
}

/// Static footer placed below the app by the page shell
#[must_use]
pub fn info_footer() -> Node {
    Element::new("footer")
        .class("info")
        .child(Element::new("p").text("Double-click to edit a todo"))
        .child(
            Element::new("p")
                .text("Part of ")
                .child(Element::new("a").attr("href", "http://todomvc.com").text("TodoMVC")),
        )
        .into()
}

/// Label after the remaining count: one item, otherwise items.
#[must_use]
pub const fn items_left_noun(count: usize) -> &'static str {
    if count == 1 { "item" } else { "items" }
}

fn header(add_error: Option<ValidationError>) -> Element {
    let mut form = Element::new("form")
        .id("addTodo")
        .attr("data-live-submit", names::ADD_TODO)
        .attr("data-live-reset", "")
        .child(
            Element::new("input")
                .class("new-todo")
                .attr("name", "text")
                .attr("placeholder", "What needs to be done?")
                .attr("autocomplete", "off")
                .attr("autofocus", ""),
        );
    if let Some(error) = add_error {
        form = form.child(error_message(error));
    }

    Element::new("header")
        .class("header")
        .child(Element::new("h1").text("todos"))
        .child(form)
}

fn main_section(state: &TodosState) -> Node {
    let toggle_all = Element::new("form")
        .id("toggleAll")
        .attr("data-live-change", names::COMPLETE_ALL)
        .child(
            Element::new("input")
                .id("toggle-all")
                .class("toggle-all")
                .attr("type", "checkbox"),
        )
        .child(
            Element::new("label")
                .attr("for", "toggle-all")
                .text("Mark all as complete"),
        );

    let rows = state.visible_todos.iter().map(|todo| {
        let edit_error = state
            .edit_error
            .filter(|edit| edit.id == todo.id)
            .map(|edit| edit.error);
        row(todo, edit_error)
    });

    Element::new("section")
        .class("main")
        .child(toggle_all)
        .child(Element::new("ul").class("todo-list").children(rows))
        .into()
}

fn row(todo: &Todo, edit_error: Option<ValidationError>) -> Element {
    let id = todo.id.to_string();

    let toggle = Element::new("form")
        .id(format!("toggle_{id}"))
        .attr("data-live-change", names::TOGGLE_TODO)
        .child(hidden_id(&id))
        .child(
            Element::new("input")
                .id(format!("input_completed_{id}"))
                .class("toggle")
                .attr("name", "completed")
                .attr("type", "checkbox")
                .attr_if(todo.completed, "checked", ""),
        )
        .child(
            Element::new("label")
                .id(format!("label_{id}"))
                .text(todo.text.as_str()),
        );

    let view = Element::new("div")
        .id(format!("view_{id}"))
        .class("view")
        .child(toggle)
        .child(
            Element::new("button")
                .class("destroy")
                .attr("data-live-click", names::REMOVE_TODO)
                .attr("data-live-value-id", id.as_str()),
        );

    let mut edit = Element::new("form")
        .id(format!("edit_{id}"))
        .attr("data-live-submit", names::EDIT_TODO)
        .child(hidden_id(&id))
        .child(
            Element::new("input")
                .class("edit")
                .attr("name", "text")
                .attr("value", todo.text.as_str()),
        );
    if let Some(error) = edit_error {
        edit = edit.child(error_message(error));
    }

    Element::new("li")
        .id(format!("li_{id}"))
        .class(if todo.completed { "completed" } else { "" })
        .child(view)
        .child(edit)
}

fn footer(count: usize, selected: Filter) -> Node {
    let filters = Filter::ALL.into_iter().map(|filter| {
        let link = Element::new("a")
            .attr("href", format!("{TODOS_PATH}?filter={}", filter.as_str()))
            .attr("data-live-patch", "")
            .class(if filter == selected { "selected" } else { "" })
            .text(filter.label());
        Element::new("li").child(link)
    });

    Element::new("footer")
        .class("footer")
        .child(
            Element::new("span")
                .class("todo-count")
                .child(Element::new("strong").text(count.to_string()))
                .text(format!(" {} left", items_left_noun(count))),
        )
        .child(Element::new("ul").class("filters").children(filters))
        .child(
            Element::new("button")
                .class("clear-completed")
                .attr("data-live-click", names::CLEAR_COMPLETED_TODOS)
                .text("Clear completed"),
        )
        .into()
}

fn hidden_id(id: &str) -> Element {
    Element::new("input")
        .attr("name", "id")
        .attr("type", "hidden")
        .attr("value", id)
}

fn error_message(error: ValidationError) -> Element {
    Element::new("p").class("error").text(error.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use crate::component::EditError;
    use crate::types::TodoId;
    use liveview_testing::query;

    fn todo(text: &str, completed: bool) -> Todo {
        Todo {
            id: TodoId::new(),
            text: text.to_string(),
            completed,
        }
    }

    fn state(todos: Vec<Todo>, filter: Filter) -> TodosState {
        TodosState {
            visible_todos: todos,
            filter,
            ..TodosState::default()
        }
    }

    #[test]
    fn empty_list_omits_main_and_footer() {
        let tree = todo_app(&TodosState::default());

        assert!(query::find_by_class(&tree, "header").is_some());
        assert!(query::find_by_class(&tree, "main").is_none());
        assert!(query::find_by_class(&tree, "footer").is_none());
        assert!(query::find_by_class(&tree, "error").is_none());
    }

    #[test]
    fn rows_carry_ids_and_completion() {
        let done = todo("walk dog", true);
        let open = todo("buy milk", false);
        let tree = todo_app(&state(vec![done.clone(), open.clone()], Filter::All));

        let rows = query::find_all_by_tag(&tree, "li")
            .into_iter()
            .filter(|li| li.attr_value("id").is_some_and(|id| id.starts_with("li_")))
            .collect::<Vec<_>>();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].attr_value("id"), Some(format!("li_{}", done.id).as_str()));
        assert!(query::has_class(rows[0], "completed"));
        assert!(!query::has_class(rows[1], "completed"));

        let label = query::find_by_id(&tree, &format!("label_{}", open.id)).unwrap();
        assert_eq!(query::text(label), "buy milk");

        let toggles = query::find_all_by_class(&tree, "toggle");
        assert_eq!(toggles[0].attr_value("checked"), Some(""));
        assert_eq!(toggles[1].attr_value("checked"), None);

        let destroy = query::find_all_by_class(&tree, "destroy");
        assert_eq!(destroy[1].attr_value("data-live-value-id"), Some(open.id.to_string().as_str()));
    }

    #[test]
    fn count_label_pluralizes_on_one() {
        for (count, expected) in [(1, "1 item left"), (2, "2 items left")] {
            let todos = (0..count).map(|i| todo(&i.to_string(), false)).collect();
            let tree = todo_app(&state(todos, Filter::All));
            let label = query::find_by_class(&tree, "todo-count").unwrap();
            assert_eq!(query::text(label), expected);
        }
        assert_eq!(items_left_noun(0), "items");
    }

    #[test]
    fn selected_filter_link_is_marked() {
        let tree = todo_app(&state(vec![todo("a", false)], Filter::Active));

        let links = query::find_all_by_tag(&tree, "a");
        let selected: Vec<_> = links
            .iter()
            .filter(|a| query::has_class(a, "selected"))
            .map(|a| a.attr_value("href").unwrap())
            .collect();
        assert_eq!(selected, ["/todos?filter=active"]);
        assert_eq!(links.len(), 3);
    }

    #[test]
    fn validation_errors_render_inline() {
        let a = todo("a", false);
        let mut view_state = state(vec![a.clone()], Filter::All);
        view_state.add_error = Some(ValidationError {
            field: "text",
            reason: "can't be blank",
        });
        view_state.edit_error = Some(EditError {
            id: a.id,
            error: ValidationError {
                field: "text",
                reason: "can't be blank",
            },
        });

        let tree = todo_app(&view_state);

        let errors = query::find_all_by_class(&tree, "error");
        assert_eq!(errors.len(), 2);
        assert_eq!(query::text(errors[0]), "text can't be blank");
        let edit_form = query::find_by_id(&tree, &format!("edit_{}", a.id)).unwrap();
        assert!(edit_form.child_nodes().iter().any(|n| n.text_content() == "text can't be blank"));
    }

    #[test]
    fn todo_text_is_escaped_in_markup() {
        let tree = todo_app(&state(vec![todo("<b>bold</b>", false)], Filter::All));
        let html = tree.to_html();

        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!html.contains("<b>bold"));
    }
}
