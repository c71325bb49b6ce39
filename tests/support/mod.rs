use std::sync::mpsc;
use std::thread;
use std::time::Duration;

pub const FUNCTIONS_PAGE: &str = r#"<HTML><HEAD><TITLE>Functions</TITLE></HEAD>
<BODY>
<DIV CLASS="copyright">Copyright &copy; 2003-2005, Peter Seibel</DIV>
<H1>5. Functions</H1>
<P>After the rules of syntax and semantics, the three most basic components of
all Lisp programs are <I>functions</I>, variables and macros.</P>
<A NAME="defining-new-functions"><H2>Defining New Functions</H2></A>
<P>Normally functions are defined using the <CODE><B>DEFUN</B></CODE> macro.</P>
<PRE>(defun hello-world () (format t &quot;hello, world&quot;))</PRE>
<P>Here&amp;apos;s the skeleton: <CODE>(&lt; 1 2)</CODE></P>
<DIV CLASS="copyright">Copyright &copy; 2003-2005, Peter Seibel</DIV>
</BODY></HTML>
"#;

pub const VARIABLES_PAGE: &str = r#"<HTML><BODY>
<P>Lisp supports two kinds of variables.</P>
</BODY></HTML>
"#;

/// `café au lait` with `é` as the single ISO-8859-1 byte 0xE9.
pub const LATIN1_PAGE: &[u8] = b"<HTML><BODY><P>caf\xE9 au lait</P></BODY></HTML>\n";

pub const NO_ARTICLE_PAGE: &str = r#"<HTML><BODY><div>under construction</div></BODY></HTML>
"#;

/// Serves a handful of book pages under `/book/`. Anything else is a 404.
pub fn spawn_book_server() -> (String, mpsc::Sender<()>, thread::JoinHandle<()>) {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("start tiny_http server");
    let addr = server.server_addr();
    let base_url = format!("http://{addr}/book/");

    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            let request = match server.recv_timeout(Duration::from_millis(50)) {
                Ok(Some(req)) => req,
                Ok(None) => continue,
                Err(_) => break,
            };

            let (status, body): (u16, &[u8]) = match request.url() {
                "/book/functions.html" => (200, FUNCTIONS_PAGE.as_bytes()),
                "/book/variables.html" => (200, VARIABLES_PAGE.as_bytes()),
                "/book/latin1.html" => (200, LATIN1_PAGE),
                "/book/under-construction.html" => (200, NO_ARTICLE_PAGE.as_bytes()),
                _ => (404, b"not found"),
            };

            let header = tiny_http::Header::from_bytes(
                &b"Content-Type"[..],
                &b"text/html; charset=iso-8859-1"[..],
            )
            .expect("build header");
            let response = tiny_http::Response::from_data(body.to_vec())
                .with_status_code(status)
                .with_header(header);
            let _ = request.respond(response);
        }
    });

    (base_url, shutdown_tx, handle)
}

pub const NAV: &str = "<ol>
  <li><a href='functions.html'>Functions</a></li>
  <li><a href='missing.html'>Missing Chapter</a></li>
  <li><a href='under-construction.html'>Under Construction</a></li>
  <li><a href='variables.html'>Variables</a></li>
</ol>";
