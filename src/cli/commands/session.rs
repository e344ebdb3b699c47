//! Interactive lookup: one application state for the whole process, driven
//! by commands read line by line from stdin.

use crate::cli::commands::show::{print_selection, print_timetable};
use crate::cli::commands::{load_dataset, raster_options, report_outcome, resolve_export};
use crate::config::Config;
use crate::core::search::{SearchMode, search, suggestions};
use crate::core::{AppState, ExamUpdate};
use crate::errors::{AppError, AppResult};
use crate::export::{ExportFormat, ExportLogic};
use crate::models::Dataset;
use crate::ui::messages::{error, header, info, success};
use crate::ui::render;
use crate::utils::formatting::long_date;
use std::io::{self, Write};

const HELP: &str = "\
Commands:
  search <name or roll>        find a student (substring)
  pick <roll>                  select a student by exact roll number
  suggest <text>               list matching student names
  show | list | table          print everything, the subjects, or the timetable
  edit <id> [field=value ...]  open a row for editing, or edit it directly
  set field=value ...          change the row being edited
  cancel                       leave edit mode without changes
  remove <id>                  drop a row from the timetable
  rooms                        toggle classroom details
  export [format] [file] [-f]  png (default), pdf, xlsx, csv, json
  help                         this text
  quit                         leave the session

Fields: name, code, date (YYYY-MM-DD), slot, room, instructor, color (#RRGGBB or 1-10)";

#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<'a> {
    data: Dataset,
    cfg: &'a Config,
    state: AppState,
}

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut session = Session::new(load_dataset(cfg), cfg);
    info("Type `help` for commands, `quit` to leave.");

    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush().ok();

        line.clear();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        match session.execute(&line) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => error(e),
        }
    }
    Ok(())
}

impl<'a> Session<'a> {
    pub fn new(data: Dataset, cfg: &'a Config) -> Self {
        Self {
            data,
            cfg,
            state: AppState::new(cfg.show_classrooms),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn execute(&mut self, line: &str) -> AppResult<Flow> {
        let line = line.trim();
        let (cmd, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match cmd.to_ascii_lowercase().as_str() {
            "" => {}
            "help" | "?" => println!("{HELP}"),
            "quit" | "exit" | "q" => return Ok(Flow::Quit),
            "search" | "s" => self.lookup(rest, SearchMode::Contains),
            "pick" => self.lookup(rest, SearchMode::ExactRoll),
            "suggest" => {
                let list = suggestions(&self.data.exams, rest, self.cfg.suggestion_min_chars);
                if !list.is_empty() {
                    println!("{}", render::suggestion_list(&list));
                }
            }
            "show" => {
                self.require_selection()?;
                print_selection(&self.state, &self.data);
            }
            "list" => {
                self.require_selection()?;
                let list = render::subject_list(self.state.exams(), &self.data, render::use_ansi());
                println!("{list}");
            }
            "table" => {
                self.require_selection()?;
                print_timetable(&self.state, &self.data);
            }
            "edit" => self.edit(rest)?,
            "set" => {
                let id = self.state.editing().ok_or_else(|| {
                    AppError::InvalidEdit("no row is being edited; use `edit <id>`".into())
                })?;
                self.apply(id, rest)?;
            }
            "cancel" => {
                self.state.cancel_edit();
                info("Edit cancelled.");
            }
            "remove" | "rm" => {
                let id = parse_id(rest)?;
                let removed = self.state.remove_exam(id)?;
                success(format!("Removed [{}] {}", removed.id, removed.record.course_name));
                print_timetable(&self.state, &self.data);
            }
            "rooms" => {
                let shown = self.state.toggle_classrooms();
                info(if shown {
                    "Classroom details shown."
                } else {
                    "Classroom details hidden."
                });
            }
            "export" => self.export(rest)?,
            other => return Err(AppError::UnknownCommand(other.to_string())),
        }
        Ok(Flow::Continue)
    }

    fn lookup(&mut self, query: &str, mode: SearchMode) {
        let outcome = search(&self.data.exams, query, mode);
        let found = report_outcome(&outcome);
        self.state.apply_search(outcome);
        if found {
            print_selection(&self.state, &self.data);
        }
    }

    fn require_selection(&self) -> AppResult<()> {
        self.state.info().map(|_| ()).ok_or(AppError::NoSelection)
    }

    fn edit(&mut self, rest: &str) -> AppResult<()> {
        let (id, assignments) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        let id = parse_id(id)?;

        if assignments.trim().is_empty() {
            self.state.begin_edit(id)?;
            let exam = self.state.exam(id)?;
            let r = &exam.record;
            header(format!("Editing [{id}]"));
            println!("name       : {}", r.course_name);
            println!("code       : {}", r.course_code);
            println!("date       : {} ({})", r.date, long_date(&r.date));
            println!("slot       : {}", r.slot);
            println!("room       : {}", exam.classroom().unwrap_or_default());
            println!("instructor : {}", exam.instructor().unwrap_or_default());
            println!("color      : {}", exam.color);
            info("Use `set field=value ...` to change, `cancel` to leave.");
            return Ok(());
        }

        self.apply(id, assignments)
    }

    fn apply(&mut self, id: usize, assignments: &str) -> AppResult<()> {
        let update = ExamUpdate::from_assignments(&split_assignments(assignments))?;
        if update.is_empty() {
            return Err(AppError::InvalidEdit("nothing to change".into()));
        }
        self.state.update_exam(id, update)?;
        success(format!("Updated [{id}]"));
        print_timetable(&self.state, &self.data);
        Ok(())
    }

    fn export(&mut self, rest: &str) -> AppResult<()> {
        let mut format = ExportFormat::default();
        let mut file = None;
        let mut force = false;

        for tok in rest.split_whitespace() {
            match tok {
                "-f" | "--force" => force = true,
                t if file.is_none() && t.parse::<ExportFormat>().is_ok() && !t.contains('.') => {
                    format = t.parse()?;
                }
                t => file = Some(t.to_string()),
            }
        }

        let path = resolve_export(self.cfg, format, file.as_deref());
        ExportLogic::export(
            &self.state,
            &self.data,
            format,
            &path,
            force,
            true,
            raster_options(self.cfg),
        )
    }
}

fn parse_id(raw: &str) -> AppResult<usize> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::InvalidEdit(format!("'{}' is not a row id", raw.trim())))
}

/// Split `room=LH 1 instructor=Dr. Rao` into `["room=LH 1", "instructor=Dr. Rao"]`:
/// a token without `=` belongs to the value before it.
fn split_assignments(rest: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for tok in rest.split_whitespace() {
        match out.last_mut() {
            Some(last) if !tok.contains('=') => {
                last.push(' ');
                last.push_str(tok);
            }
            _ => out.push(tok.to_string()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateIndex, ExamRecord, PALETTE, SlotTiming, SlotTimingMap};

    fn data() -> Dataset {
        let mut dates = DateIndex::new();
        dates.insert("2024-01-10".into(), 1);
        let mut slot_timing = SlotTimingMap::new();
        slot_timing.insert("A".into(), SlotTiming::new("9:00 am", "11:00 am"));
        slot_timing.insert("C".into(), SlotTiming::new("2:00 pm", "4:00 pm"));
        let rec = |course: &str| ExamRecord {
            student_name: "Alice Kumar".into(),
            roll_no: "CS21B001".into(),
            course_name: course.into(),
            date: "2024-01-10".into(),
            slot: "A".into(),
            ..ExamRecord::default()
        };
        Dataset {
            exams: vec![rec("Physics"), rec("Chemistry")],
            dates,
            slot_timing,
        }
    }

    #[test]
    fn assignments_keep_spaces_in_values() {
        assert_eq!(
            split_assignments("room=LH 1 instructor=Dr. Rao"),
            vec!["room=LH 1", "instructor=Dr. Rao"]
        );
        assert!(split_assignments("").is_empty());
    }

    #[test]
    fn search_edit_remove_flow() {
        let cfg = Config::default();
        let mut s = Session::new(data(), &cfg);

        s.execute("search alice").unwrap();
        assert_eq!(s.state().exams().len(), 2);

        s.execute("edit 2").unwrap();
        assert_eq!(s.state().editing(), Some(2));
        s.execute("set slot=C2 color=6").unwrap();
        assert_eq!(s.state().editing(), None);
        let chem = s.state().exam(2).unwrap();
        assert_eq!(chem.record.slot, "C");
        assert_eq!(chem.color, PALETTE[5]);

        s.execute("remove 1").unwrap();
        assert_eq!(s.state().exams().len(), 1);
        assert!(s.execute("remove 1").is_err());
    }

    #[test]
    fn miss_clears_selection() {
        let cfg = Config::default();
        let mut s = Session::new(data(), &cfg);
        s.execute("pick cs21b001").unwrap();
        assert!(s.state().info().is_some());

        s.execute("search nobody").unwrap();
        assert!(s.state().info().is_none());
        assert!(matches!(s.execute("show"), Err(AppError::NoSelection)));
    }

    #[test]
    fn set_without_edit_mode_is_rejected() {
        let cfg = Config::default();
        let mut s = Session::new(data(), &cfg);
        s.execute("search alice").unwrap();
        assert!(s.execute("set room=L1").is_err());
        assert_eq!(s.execute("quit").unwrap(), Flow::Quit);
    }

    #[test]
    fn unknown_command_is_its_own_error() {
        let cfg = Config::default();
        let mut s = Session::new(data(), &cfg);
        let err = s.execute("Fly away").unwrap_err();
        assert!(matches!(&err, AppError::UnknownCommand(c) if c == "fly"));
        assert!(!err.to_string().contains("Invalid edit"));
    }

    #[test]
    fn rooms_toggle() {
        let cfg = Config::default();
        let mut s = Session::new(data(), &cfg);
        s.execute("rooms").unwrap();
        assert!(!s.state().show_classrooms);
    }
}
