use pad::PadStr;

pub struct Table {
    titles: Vec<String>,
    rows: Vec<Vec<String>>,
    headless: bool,
}

impl Table {
    pub fn new(titles: Vec<String>, headless: bool) -> Table {
        Table {
            titles,
            rows: Vec::new(),
            headless,
        }
    }

    pub fn add(&mut self, row: Vec<String>) {
        assert_eq!(row.len(), self.titles.len(), "unexpected row len");
        self.rows.push(row);
    }

    pub fn show(self) {
        let mut widths: Vec<usize> = self
            .titles
            .iter()
            .map(|t| {
                if self.headless {
                    0
                } else {
                    console::measure_text_width(t)
                }
            })
            .collect();
        for row in self.rows.iter() {
            for (coli, cell) in row.iter().enumerate() {
                let size = console::measure_text_width(cell);
                if size > widths[coli] {
                    widths[coli] = size;
                }
            }
        }

        let mut split = String::from("+");
        for width in widths.iter() {
            for _ in 0..*width + 2 {
                split.push('-');
            }
            split.push('+');
        }

        let render_row = |row: Vec<String>| {
            let mut line = String::from("|");
            for (coli, cell) in row.into_iter().enumerate() {
                let text = cell.pad_to_width_with_alignment(widths[coli], pad::Alignment::Left);
                line.push_str(&format!(" {text} |"));
            }
            eprintln!("{line}");
        };

        eprintln!("{split}");
        if !self.headless {
            render_row(self.titles.clone());
            eprintln!("{split}");
        }
        for row in self.rows {
            render_row(row);
        }
        eprintln!("{split}");
    }
}
