//! Console progress table printed when a run is traced.
use crate::minimize::OutputFlags;
use ndarray::prelude::*;
use std::io::{self, Write};

const GREEN: &str = "\x1B[1;32m";
const BLUE: &str = "\x1B[1;34m";
const RED: &str = "\x1B[1;31m";
const RESET: &str = "\x1B[0m";

/// One row of the progress table
#[derive(Debug, Clone, Copy)]
pub(crate) struct Progress<'a> {
    pub(crate) iteration: usize,
    pub(crate) fn_evals: usize,
    pub(crate) fmin: f64,
    pub(crate) stopping_criterion: f64,
    pub(crate) best_point: ArrayView1<'a, f64>,
}

fn header<W: Write + ?Sized>(out: &mut W, threshold: f64) -> io::Result<()> {
    writeln!(
        out,
        "{}\titer\tfevals\tfmin\t\tstopping_criteria (<={:.20}){}",
        BLUE, threshold, RESET
    )
}

pub(crate) fn start<W: Write + ?Sized>(
    out: &mut W,
    flags: &OutputFlags,
    threshold: f64,
) -> io::Result<()> {
    if !flags.trace {
        return Ok(());
    }
    writeln!(out, "{}> Nelder-Mead Simplex Start >{}", GREEN, RESET)?;
    // With the best vertex tracked the header is repeated above every row
    if !flags.prints_best_vertex() {
        header(out, threshold)?;
    }
    Ok(())
}

pub(crate) fn row<W: Write + ?Sized>(
    out: &mut W,
    flags: &OutputFlags,
    threshold: f64,
    progress: &Progress,
) -> io::Result<()> {
    if !flags.trace {
        return Ok(());
    }
    if flags.prints_best_vertex() {
        header(out, threshold)?;
    }
    writeln!(
        out,
        "\t{}\t{}\t{:.6}\t{:.20}",
        progress.iteration, progress.fn_evals, progress.fmin, progress.stopping_criterion
    )?;
    if flags.prints_best_vertex() {
        let coords: Vec<String> = progress
            .best_point
            .iter()
            .map(|x| format!("{:.6}", x))
            .collect();
        writeln!(out, "\n\t\tP_best = ({})\n", coords.join(","))?;
    }
    Ok(())
}

pub(crate) fn finish<W: Write + ?Sized>(out: &mut W, flags: &OutputFlags) -> io::Result<()> {
    if flags.trace {
        writeln!(out, "{}< Nelder-Mead Simplex End <{}", RED, RESET)?;
    }
    Ok(())
}
