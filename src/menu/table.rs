use crate::types::Field;

#[derive(Debug, Clone)]
pub struct MenuOption<A> {
    pub key: &'static str,
    pub label: String,
    pub action: A,
}

/// An ordered, immutable set of menu commands
#[derive(Debug, Clone)]
pub struct CommandTable<A> {
    heading: &'static str,
    indent: &'static str,
    options: Vec<MenuOption<A>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopAction {
    SingleSearch,
    MultiSearch,
    MultiSearchFromFile,
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayAction {
    All,
    Project(Field),
    Help,
    Done,
}

impl<A: Copy> CommandTable<A> {
    pub fn new(heading: &'static str, indent: &'static str, options: Vec<MenuOption<A>>) -> Self {
        Self {
            heading,
            indent,
            options,
        }
    }

    /// Action bound to the typed command, if any
    pub fn lookup(&self, input: &str) -> Option<A> {
        let input = input.trim();
        self.options
            .iter()
            .find(|option| option.key == input)
            .map(|option| option.action)
    }

    pub fn options(&self) -> &[MenuOption<A>] {
        &self.options
    }

    /// Label of the option bound to `action`
    pub fn label_of(&self, action: A) -> Option<&str>
    where
        A: PartialEq,
    {
        self.options
            .iter()
            .find(|option| option.action == action)
            .map(|option| option.label.as_str())
    }

    pub fn instructions(&self) -> String {
        let mut text = self.heading.to_string();
        for option in &self.options {
            text.push('\n');
            text.push_str(self.indent);
            text.push_str(&format!("[{}] {}", option.key, option.label));
        }
        text
    }
}

fn option<A>(key: &'static str, label: impl Into<String>, action: A) -> MenuOption<A> {
    MenuOption {
        key,
        label: label.into(),
        action,
    }
}

impl CommandTable<TopAction> {
    pub fn top_level() -> Self {
        Self::new(
            "Select one of the following options:",
            "  ",
            vec![
                option("1", "Single Search - Look up one person", TopAction::SingleSearch),
                option(
                    "2",
                    "Multi Search - Look up multiple people at a time",
                    TopAction::MultiSearch,
                ),
                option(
                    "3",
                    "Multi Search From File - Look up multiple people from a file with a search query on each line",
                    TopAction::MultiSearchFromFile,
                ),
                option("h", "Help - Display these instructions", TopAction::Help),
                option("q", "Quit - End program", TopAction::Quit),
            ],
        )
    }
}

impl CommandTable<DisplayAction> {
    /// Projection commands for a backend filling `fields`. The third projection is offered
    /// only when the backend fills `major`, under `major_label` ("majors", "titles").
    pub fn display(fields: &[Field], major_label: &str) -> Self {
        let mut options = vec![
            option("1", "Display all info", DisplayAction::All),
            option("2", "Display emails only", DisplayAction::Project(Field::Email)),
            option("3", "Display names only", DisplayAction::Project(Field::Name)),
        ];
        if fields.contains(&Field::Major) {
            options.push(option(
                "4",
                format!("Display {} only", major_label),
                DisplayAction::Project(Field::Major),
            ));
        }
        options.push(option("h", "Help - Display these instructions", DisplayAction::Help));
        options.push(option("d", "Done - Enter a new search", DisplayAction::Done));

        Self::new("How would you like to display the information?", "    ", options)
    }
}
