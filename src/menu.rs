//! menu: интерактивный текстовый интерфейс поверх Hotel.
//!
//! Вход/выход абстрагированы (BufRead/Write), поэтому сессию можно прогнать
//! скриптом в тестах. Конец ввода (EOF) в любом месте = выход.
//! Доменные ошибки печатаются и цикл продолжается; наружу уходят только
//! ошибки самого терминала (запись в out).

use anyhow::Result;
use std::io::{BufRead, Write};

use crate::error::HotelError;
use crate::hotel::Hotel;
use crate::model::{Booking, Room};
use crate::session::Session;
use crate::store::Backend;

const RULE: &str = "==================================================";
const THIN_RULE: &str = "--------------------------------------------------";

pub struct Menu<'h, B: Backend, R: BufRead, W: Write> {
    hotel: &'h mut Hotel<B>,
    input: R,
    out: W,
}

// Signal from a sub-flow: keep going or input is exhausted.
enum Flow {
    Continue,
    Eof,
}

impl<'h, B: Backend, R: BufRead, W: Write> Menu<'h, B, R, W> {
    pub fn new(hotel: &'h mut Hotel<B>, input: R, out: W) -> Self {
        Self { hotel, input, out }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Top-level loop: Signup / Login / Exit.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.banner("     WELCOME TO HOTEL MANAGEMENT SYSTEM")?;
            writeln!(self.out, "\n1. Signup\n2. Login\n3. Exit")?;
            writeln!(self.out, "{RULE}")?;

            let Some(choice) = self.prompt("\nEnter your choice (1-3): ")? else {
                break;
            };
            let flow = match choice.as_str() {
                "1" => self.signup()?,
                "2" => match self.login()? {
                    Some(session) => self.user_menu(session)?,
                    None => Flow::Continue,
                },
                "3" => break,
                _ => {
                    writeln!(self.out, "❌ Invalid choice! Please try again.")?;
                    Flow::Continue
                }
            };
            if let Flow::Eof = flow {
                break;
            }
        }
        writeln!(self.out, "\n👋 Thank you for visiting! Goodbye!")?;
        Ok(())
    }

    fn user_menu(&mut self, session: Session) -> Result<Flow> {
        loop {
            self.banner("           HOTEL MANAGEMENT SYSTEM")?;
            writeln!(self.out, "Logged in as: {}", session.username())?;
            writeln!(
                self.out,
                "\n1. View Available Rooms\n2. Book a Room\n3. View My Bookings\n4. Cancel Booking\n5. Logout"
            )?;
            writeln!(self.out, "{RULE}")?;

            let Some(choice) = self.prompt("\nEnter your choice (1-5): ")? else {
                return Ok(Flow::Eof);
            };
            let flow = match choice.as_str() {
                "1" => {
                    self.show_available()?;
                    Flow::Continue
                }
                "2" => self.book(&session)?,
                "3" => {
                    self.show_mine(&session)?;
                    Flow::Continue
                }
                "4" => self.cancel(&session)?,
                "5" => {
                    writeln!(self.out, "\n👋 Logging out... Thank you for using our service!")?;
                    return Ok(Flow::Continue);
                }
                _ => {
                    writeln!(self.out, "❌ Invalid choice! Please try again.")?;
                    Flow::Continue
                }
            };
            if let Flow::Eof = flow {
                return Ok(Flow::Eof);
            }
        }
    }

    // -------------------- flows --------------------

    fn signup(&mut self) -> Result<Flow> {
        self.banner("           USER SIGNUP")?;
        let Some(username) = self.prompt("Enter username: ")? else {
            return Ok(Flow::Eof);
        };
        // Ранний отказ, чтобы не спрашивать остальные поля зря.
        if self.hotel.accounts().get(&username).is_some() {
            self.report(HotelError::UsernameTaken(username))?;
            return Ok(Flow::Continue);
        }
        let mut fields = Vec::with_capacity(4);
        for label in [
            "Enter password: ",
            "Enter your full name: ",
            "Enter your email: ",
            "Enter your phone number: ",
        ] {
            match self.prompt(label)? {
                Some(v) => fields.push(v),
                None => return Ok(Flow::Eof),
            }
        }

        let outcome = self
            .hotel
            .accounts()
            .signup(&username, &fields[0], &fields[1], &fields[2], &fields[3]);
        match outcome {
            Ok(_) => writeln!(self.out, "\n✅ Signup successful! You can now login.")?,
            Err(e) => self.report(e)?,
        }
        Ok(Flow::Continue)
    }

    fn login(&mut self) -> Result<Option<Session>> {
        self.banner("           USER LOGIN")?;
        let Some(username) = self.prompt("Enter username: ")? else {
            return Ok(None);
        };
        let Some(password) = self.prompt("Enter password: ")? else {
            return Ok(None);
        };
        let outcome = self.hotel.accounts().login(&username, &password);
        match outcome {
            Ok(session) => {
                let name = self
                    .hotel
                    .accounts()
                    .get(session.username())
                    .map(|a| a.name)
                    .unwrap_or_else(|| session.username().to_string());
                writeln!(self.out, "\n✅ Welcome back, {name}!")?;
                Ok(Some(session))
            }
            Err(e) => {
                self.report(e)?;
                Ok(None)
            }
        }
    }

    fn show_available(&mut self) -> Result<()> {
        self.banner("           AVAILABLE ROOMS")?;
        let rooms = self.hotel.rooms().list_available();
        if rooms.is_empty() {
            writeln!(self.out, "❌ No rooms available at the moment.")?;
            return Ok(());
        }
        writeln!(
            self.out,
            "\n{:<10} {:<15} {:<15} {:<10}",
            "Room No.", "Type", "Price/Night", "Status"
        )?;
        writeln!(self.out, "{THIN_RULE}")?;
        for (no, room) in &rooms {
            self.room_row(no, room)?;
        }
        Ok(())
    }

    fn book(&mut self, session: &Session) -> Result<Flow> {
        self.banner("           BOOK A ROOM")?;
        self.show_available()?;

        let Some(room_no) = self.prompt("\nEnter room number to book: ")? else {
            return Ok(Flow::Eof);
        };
        // Проверяем номер до того, как спрашивать даты.
        let found = self.hotel.rooms().get_room(&room_no);
        match found {
            Ok(room) if room.is_available() => {}
            Ok(_) => {
                self.report(HotelError::RoomUnavailable(room_no))?;
                return Ok(Flow::Continue);
            }
            Err(e) => {
                self.report(e)?;
                return Ok(Flow::Continue);
            }
        }

        let Some(check_in) = self.prompt("Enter check-in date (YYYY-MM-DD): ")? else {
            return Ok(Flow::Eof);
        };
        let Some(check_out) = self.prompt("Enter check-out date (YYYY-MM-DD): ")? else {
            return Ok(Flow::Eof);
        };
        let Some(guests) = self.prompt("Enter number of guests: ")? else {
            return Ok(Flow::Eof);
        };

        let outcome = self
            .hotel
            .ledger()
            .book(session, &room_no, &check_in, &check_out, &guests);
        match outcome {
            Ok(c) => {
                writeln!(self.out, "\n✅ Room booked successfully!")?;
                writeln!(self.out, "Booking ID: {}", c.id)?;
                writeln!(self.out, "Room Number: {}", c.booking.room_no)?;
                writeln!(self.out, "Room Type: {}", c.booking.room_type)?;
                writeln!(self.out, "Price per night: ₹{}", c.booking.price)?;
            }
            Err(e) => self.report(e)?,
        }
        Ok(Flow::Continue)
    }

    fn show_mine(&mut self, session: &Session) -> Result<()> {
        self.banner("           MY BOOKINGS")?;
        let mine = self.hotel.ledger().list_mine(session);
        if mine.is_empty() {
            writeln!(self.out, "❌ You have no bookings yet.")?;
            return Ok(());
        }
        for (id, b) in &mine {
            self.booking_card(id, b)?;
        }
        Ok(())
    }

    fn cancel(&mut self, session: &Session) -> Result<Flow> {
        self.banner("           CANCEL BOOKING")?;
        self.show_mine(session)?;
        let Some(id) = self.prompt("\nEnter Booking ID to cancel: ")? else {
            return Ok(Flow::Eof);
        };
        let outcome = self.hotel.ledger().cancel(session, &id);
        match outcome {
            Ok(b) => {
                writeln!(self.out, "\n✅ Booking {id} cancelled successfully!")?;
                writeln!(self.out, "Room {} is now available for booking.", b.room_no)?;
            }
            Err(e) => self.report(e)?,
        }
        Ok(Flow::Continue)
    }

    // -------------------- io helpers --------------------

    fn banner(&mut self, title: &str) -> Result<()> {
        writeln!(self.out, "\n{RULE}\n{title}\n{RULE}")?;
        Ok(())
    }

    fn room_row(&mut self, no: &str, room: &Room) -> Result<()> {
        writeln!(
            self.out,
            "{:<10} {:<15} ₹{:<14} {:<10}",
            no,
            room.room_type.as_str(),
            room.price,
            room.status.to_string()
        )?;
        Ok(())
    }

    fn booking_card(&mut self, id: &str, b: &Booking) -> Result<()> {
        writeln!(self.out, "\nBooking ID: {id}")?;
        writeln!(self.out, "Room Number: {}", b.room_no)?;
        writeln!(self.out, "Room Type: {}", b.room_type)?;
        writeln!(self.out, "Price: ₹{}/night", b.price)?;
        writeln!(self.out, "Check-in: {}", b.check_in)?;
        writeln!(self.out, "Check-out: {}", b.check_out)?;
        writeln!(self.out, "Guests: {}", b.guests)?;
        writeln!(self.out, "Status: {}", b.status)?;
        writeln!(
            self.out,
            "Booked on: {}",
            b.booking_date.format(crate::consts::TIMESTAMP_FORMAT)
        )?;
        writeln!(self.out, "{THIN_RULE}")?;
        Ok(())
    }

    fn report(&mut self, err: HotelError) -> Result<()> {
        let msg = match &err {
            HotelError::UsernameTaken(_) => {
                "Username already exists! Please try a different username.".to_string()
            }
            HotelError::InvalidCredentials => "Invalid username or password!".to_string(),
            HotelError::RoomNotFound(_) => "Invalid room number!".to_string(),
            HotelError::RoomUnavailable(_) => "This room is not available!".to_string(),
            HotelError::BookingNotFound(_) => "Invalid Booking ID!".to_string(),
            HotelError::NotOwner(_) => "This booking doesn't belong to you!".to_string(),
            HotelError::AlreadyCancelled(_) => "This booking is already cancelled!".to_string(),
            HotelError::Storage(e) => {
                log::error!("storage failure: {:#}", e);
                format!("Could not save changes: {e:#}")
            }
        };
        writeln!(self.out, "❌ {msg}")?;
        Ok(())
    }

    /// Print a prompt and read one trimmed line. None on end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
