use std::{cell::RefCell, fmt::Write, io::{self, Read}, path::PathBuf, rc::Rc};

pub struct StringBuffer {
    s: String,
}

impl StringBuffer {
    pub fn new() -> StringBuffer {
        StringBuffer{s: String::new()}
    }

    pub fn as_str(&self) -> &str {
        self.s.as_str()
    }

    pub fn clear(&mut self) {
        self.s = String::new();
    }
}

// String only implements fmt::Write
impl io::Write for StringBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let str_rep = std::str::from_utf8(buf)
            .map_err(|e| {
                io::Error::new(io::ErrorKind::InvalidData, e)
            })?;
        self.s.write_str(str_rep)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// A cloneable, shared stream writer, for single-threaded use.
//
// Mainly used to collect warnings and errors of interest to the user,
// so they can go to stderr from the cli, or into a buffer in tests.
#[derive(Clone)]
pub struct WriteHandle {
    w: Rc<RefCell<dyn io::Write>>,
}

impl WriteHandle {
    pub fn stdout_write_handle() -> WriteHandle {
        WriteHandle{
            w: Rc::new(RefCell::new(io::stdout()))
        }
    }

    pub fn stderr_write_handle() -> WriteHandle {
        WriteHandle{
            w: Rc::new(RefCell::new(io::stderr()))
        }
    }

    pub fn string_buff_write_handle() -> (WriteHandle, Rc<RefCell<StringBuffer>>) {
        let buffer = Rc::new(RefCell::new(StringBuffer::new()));
        let h = WriteHandle{
            w: buffer.clone()
        };
        (h, buffer)
    }

    pub fn empty_write_handle() -> WriteHandle {
        WriteHandle{
            w: Rc::new(RefCell::new(io::empty()))
        }
    }
}

impl io::Write for WriteHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // Trace here, since tests should generally disable the error writer
        // or use a string buffer.
        tracing::trace!("WriteHandle::write {:?}", String::from_utf8_lossy(buf));
        self.w.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.w.borrow_mut().flush()
    }
}

/// Writes a line to a WriteHandle, ignoring any failure to write.
/// There isn't much to be done if we can't even write the error out.
#[macro_export]
macro_rules! write_errln {
    ($handle:expr, $($arg:tt)*) => {{
        use std::io::Write as _;
        let _ = writeln!($handle, $($arg)*);
    }};
}

// Generally, this will represent a file that has been opened,
// where we want to track the name along with it.
// Though it may be pre-read, in which case, we can just store
// the string.
pub enum DescribedReader {
    String((String, String)),
    FilePath(PathBuf),
    Stdin,
}

impl DescribedReader {
    pub fn from_string(desc: String, data: String) -> DescribedReader {
        DescribedReader::String((desc, data))
    }

    pub fn from_file_path(path: PathBuf) -> DescribedReader {
        DescribedReader::FilePath(path)
    }

    /// "-" is taken to mean stdin, like most cli tools.
    pub fn from_cli_arg(arg: &str) -> DescribedReader {
        if arg == "-" {
            DescribedReader::Stdin
        } else {
            DescribedReader::FilePath(PathBuf::from(arg))
        }
    }

    pub fn desc(&self) -> &str {
        match self {
            DescribedReader::String((name, _)) => name,
            DescribedReader::FilePath(path) =>
                path.to_str().unwrap_or("<unknown path>"),
            DescribedReader::Stdin => "<stdin>",
        }
    }

    pub fn reader<'a>(&'a self) -> Result<Box<dyn io::Read + 'a>, io::Error> {
        match self {
            DescribedReader::String((_, text)) => {
                Ok(Box::new(io::Cursor::new(text.as_bytes())))
            },
            DescribedReader::FilePath(path) => {
                Ok(Box::new(std::fs::File::open(path)?))
            },
            DescribedReader::Stdin => Ok(Box::new(io::stdin())),
        }
    }

    pub fn read_to_string(&self) -> Result<String, String> {
        let mut text = String::new();
        self.reader()
            .and_then(|mut r| r.read_to_string(&mut text))
            .map_err(|e| format!("Failed to read {}: {}", self.desc(), e))?;
        Ok(text)
    }
}
