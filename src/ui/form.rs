//! Interactive terminal rendition of the citation form.
//!
//! Buttons become numbered actions, text fields become line prompts and
//! dialogs become status notices. Input is read line by line from any
//! [`BufRead`], so the whole form can be driven from a script in tests.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use owo_colors::OwoColorize;

use crate::app::{CitationForm, CommandError, ExportOutcome, ValidationError};
use crate::models::{CitationFormat, Theme};
use crate::ui::{paint_surface, status_line, wrap_text, Spinner, Status, WINDOW_TITLE};
use crate::utils::ExportError;

/// Number of text rows in the citation display
pub const DISPLAY_HEIGHT: usize = 10;

/// User actions offered by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Generate,
    Export,
    SearchMirror,
    SelectFormat,
    ToggleTheme,
    Close,
}

impl Action {
    /// Every action, in menu order
    pub const ALL: [Action; 6] = [
        Action::Generate,
        Action::Export,
        Action::SearchMirror,
        Action::SelectFormat,
        Action::ToggleTheme,
        Action::Close,
    ];

    /// Key typed to trigger the action
    pub fn key(self) -> &'static str {
        match self {
            Action::Generate => "1",
            Action::Export => "2",
            Action::SearchMirror => "3",
            Action::SelectFormat => "4",
            Action::ToggleTheme => "5",
            Action::Close => "0",
        }
    }

    /// Button caption
    pub fn label(self) -> &'static str {
        match self {
            Action::Generate => "Generar Cita",
            Action::Export => "Exportar Citas a TXT",
            Action::SearchMirror => "Buscar en Sci-Hub",
            Action::SelectFormat => "Seleccionar formato de cita",
            Action::ToggleTheme => "Cambiar Tema",
            Action::Close => "Salir",
        }
    }

    /// Parse a menu choice: the key, or the first letter of a short alias
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim().to_lowercase();
        if let Some(action) = Self::ALL.into_iter().find(|a| a.key() == input) {
            return Some(action);
        }
        match input.as_str() {
            "g" | "generar" => Some(Action::Generate),
            "e" | "exportar" => Some(Action::Export),
            "b" | "buscar" => Some(Action::SearchMirror),
            "f" | "formato" => Some(Action::SelectFormat),
            "t" | "tema" => Some(Action::ToggleTheme),
            "q" | "salir" => Some(Action::Close),
            _ => None,
        }
    }
}

/// User-facing text for a failed command
pub fn error_message(err: &CommandError) -> String {
    match err {
        CommandError::Validation(ValidationError::EmptyDoi) => {
            "Por favor, ingrese un DOI válido.".to_string()
        }
        CommandError::Validation(ValidationError::EmptyMirrorDoi) => {
            "Por favor, ingrese un DOI para buscar en Sci-Hub.".to_string()
        }
        CommandError::Lookup(_) => "No se pudo obtener información del DOI.".to_string(),
        CommandError::Export(ExportError::Empty) => "No hay citas para exportar.".to_string(),
        CommandError::Export(ExportError::Io { path, source }) => format!(
            "No se pudieron guardar las citas en {}: {}",
            path.display(),
            source
        ),
    }
}

/// Lines shown in the citation display, scrolled to the newest citation.
///
/// Each citation is wrapped to `width` and followed by a blank line; only the
/// last `height` lines are kept.
pub fn display_lines(citations: &[String], width: usize, height: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for citation in citations {
        lines.extend(wrap_text(citation, width));
        lines.push(String::new());
    }
    let start = lines.len().saturating_sub(height);
    lines.split_off(start)
}

/// Read one line from `input` after printing `label`.
///
/// Returns `None` once the input is exhausted.
fn read_field<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    write!(output, "{}: ", label)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(output)?;
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// The citation form bound to an input and an output stream
pub struct FormView<R, W> {
    form: CitationForm,
    input: R,
    output: W,
    colored: bool,
    width: usize,
}

impl<R: BufRead, W: Write> FormView<R, W> {
    /// Create a plain (uncolored, 80 column) view
    pub fn new(form: CitationForm, input: R, output: W) -> Self {
        Self {
            form,
            input,
            output,
            colored: false,
            width: 80,
        }
    }

    /// Enable ANSI colours and the lookup spinner
    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Set the display width in columns
    pub fn width(mut self, width: usize) -> Self {
        self.width = width.max(20);
        self
    }

    pub fn into_parts(self) -> (CitationForm, W) {
        (self.form, self.output)
    }

    /// Run the event loop until the user closes the form or input ends.
    ///
    /// Command failures are reported on the output and never end the loop;
    /// only I/O errors on the streams themselves are returned.
    pub async fn run(&mut self) -> io::Result<()> {
        self.render_header()?;
        self.render_menu()?;

        loop {
            let Some(choice) = read_field(&mut self.input, &mut self.output, "Opción")? else {
                tracing::debug!("Input closed, leaving the form");
                break;
            };
            if choice.is_empty() {
                continue;
            }

            let Some(action) = Action::parse(&choice) else {
                self.notify(
                    Status::Warning,
                    "Aviso",
                    &format!("Opción no reconocida: {}", choice),
                )?;
                continue;
            };

            tracing::debug!(?action, "Action selected");
            match action {
                Action::Generate => self.on_generate().await?,
                Action::Export => self.on_export()?,
                Action::SearchMirror => self.on_search_mirror()?,
                Action::SelectFormat => self.on_select_format()?,
                Action::ToggleTheme => self.on_toggle_theme()?,
                Action::Close => {
                    if self.on_close()? {
                        break;
                    }
                }
            }
            self.render_menu()?;
        }

        self.output.flush()
    }

    async fn on_generate(&mut self) -> io::Result<()> {
        let Some(doi) = read_field(
            &mut self.input,
            &mut self.output,
            "Ingrese el DOI del artículo",
        )?
        else {
            return Ok(());
        };

        let spinner = Spinner::new("Consultando doi.org...", self.colored);
        let result = self.form.generate(&doi).await;
        spinner.finish();

        match result {
            Ok(_) => self.render_display(),
            Err(e) => self.report(&e),
        }
    }

    fn on_export(&mut self) -> io::Result<()> {
        let mut prompt_error = None;
        let input = &mut self.input;
        let output = &mut self.output;

        let result = self.form.export_with(|| {
            match read_field(input, output, "Guardar como (.txt, vacío para cancelar)") {
                Ok(Some(path)) if !path.is_empty() => Some(PathBuf::from(path)),
                Ok(_) => None,
                Err(e) => {
                    prompt_error = Some(e);
                    None
                }
            }
        });

        if let Some(e) = prompt_error {
            return Err(e);
        }

        match result {
            Ok(ExportOutcome::Written { path, .. }) => self.notify(
                Status::Success,
                "Exportación Exitosa",
                &format!("Las citas se han guardado en {}", path.display()),
            ),
            Ok(ExportOutcome::Cancelled) => Ok(()),
            Err(e) => self.report(&e),
        }
    }

    fn on_search_mirror(&mut self) -> io::Result<()> {
        let Some(doi) = read_field(
            &mut self.input,
            &mut self.output,
            "¿Quieres buscar el artículo en Sci-Hub? DOI",
        )?
        else {
            return Ok(());
        };

        match self.form.search_mirror(&doi) {
            Ok(url) => self.notify(Status::Search, "Sci-Hub", &format!("Abriendo {}", url)),
            Err(e) => self.report(&e),
        }
    }

    fn on_select_format(&mut self) -> io::Result<()> {
        let Some(answer) = read_field(
            &mut self.input,
            &mut self.output,
            "Seleccione el formato de cita [APA/Vancouver]",
        )?
        else {
            return Ok(());
        };

        match answer.parse::<CitationFormat>() {
            Ok(format) => {
                self.form.select_format(format);
                self.notify(Status::Info, "Formato", format.name())
            }
            Err(e) => {
                tracing::debug!(error = %e, "Format not changed");
                self.notify(
                    Status::Warning,
                    "Aviso",
                    &format!("Formato no reconocido: {}", answer),
                )
            }
        }
    }

    fn on_toggle_theme(&mut self) -> io::Result<()> {
        self.form.toggle_theme();
        self.render_header()?;
        if !self.form.citations().is_empty() {
            self.render_display()?;
        }
        Ok(())
    }

    /// Ask for confirmation; `true` means the form should close
    fn on_close(&mut self) -> io::Result<bool> {
        let answer = read_field(
            &mut self.input,
            &mut self.output,
            "¿Seguro que quieres cerrar el programa? [s/N]",
        )?;

        Ok(match answer {
            None => true,
            Some(answer) => matches!(
                answer.to_lowercase().as_str(),
                "s" | "si" | "sí" | "y" | "yes"
            ),
        })
    }

    fn report(&mut self, err: &CommandError) -> io::Result<()> {
        tracing::warn!(error = %err, "Command failed");
        let message = error_message(err);
        self.notify(Status::Error, "Error", &message)
    }

    fn notify(&mut self, status: Status, title: &str, message: &str) -> io::Result<()> {
        writeln!(
            self.output,
            "{}",
            status_line(status, title, message, self.colored)
        )
    }

    fn surface(&mut self, text: &str) -> io::Result<()> {
        let line = paint_surface(text, self.form.theme(), self.width, self.colored);
        writeln!(self.output, "{}", line)
    }

    fn render_header(&mut self) -> io::Result<()> {
        let theme = match self.form.theme() {
            Theme::Light => "claro",
            Theme::Dark => "oscuro",
        };
        let selector = CitationFormat::ALL
            .iter()
            .map(|f| {
                let mark = if *f == self.form.format() { "(•)" } else { "( )" };
                format!("{} {}", mark, f.name())
            })
            .collect::<Vec<_>>()
            .join("  ");

        writeln!(self.output)?;
        self.surface(&format!(" {}", WINDOW_TITLE))?;
        self.surface(&format!(
            " Formato de cita: {}   Tema: {} ({})",
            selector,
            theme,
            self.form.theme().background_hex()
        ))
    }

    fn render_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        for action in Action::ALL {
            let key = if self.colored {
                action.key().cyan().bold().to_string()
            } else {
                action.key().to_string()
            };
            writeln!(self.output, "  [{}] {}", key, action.label())?;
        }
        Ok(())
    }

    fn render_display(&mut self) -> io::Result<()> {
        let count = self.form.citations().len();
        let lines = display_lines(
            self.form.citations(),
            self.width.saturating_sub(2),
            DISPLAY_HEIGHT,
        );

        writeln!(self.output)?;
        self.surface(&format!("── Citas ({}) ──", count))?;
        for line in lines {
            self.surface(&format!(" {}", line))?;
        }
        Ok(())
    }
}
