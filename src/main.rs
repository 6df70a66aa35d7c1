use arrayvec::ArrayVec;
use bitvec::prelude::*;
use itertools::{Itertools, MinMaxResult};
use regex::Regex;
use rustc_hash::FxHashMap;

mod duet;
mod knot;

////////////////////////////////////////////////////////////////////////////////

fn spiral() -> impl Iterator<Item = (i64, i64)> {
    // legs run E1 N1 W2 S2 E3 N3 W4 S4 ...
    let (mut x, mut y) = (0, 0);
    std::iter::once((0, 0)).chain((1i64 ..).flat_map(|leg| {
        let (dx, dy) = [(1, 0), (0, 1), (-1, 0), (0, -1)][((leg - 1) % 4) as usize];
        std::iter::repeat((dx, dy)).take((leg as usize + 1) / 2)
    }).map(move |(dx, dy)| {x += dx; y += dy; (x, y)}))
}

fn dance(line: &mut [u8], steps: &str) {
    for step in steps.trim().split(',') {
        let (kind, rest) = step.split_at(1);
        match kind {
            "s" => line.rotate_right(rest.parse().expect(step)),
            "x" => {
                let (a, b) = rest.split_once('/').unwrap_or_else(|| panic!("cannot parse {}", step));
                line.swap(a.parse().expect(step), b.parse().expect(step));
            }
            "p" => {
                let (a, b) = rest.split_once('/').unwrap_or_else(|| panic!("cannot parse {}", step));
                let a = line.iter().position(|&p| p == a.as_bytes()[0]).expect(step);
                let b = line.iter().position(|&p| p == b.as_bytes()[0]).expect(step);
                line.swap(a, b);
            }
            _ => panic!("unexpected dance move {}", step)
        }
    }
}

fn build_disk(key: &str) -> BitVec {
    let mut disk = BitVec::with_capacity(128 * 128);
    for row in 0 .. 128 {
        for byte in knot::digest(&format!("{}-{}", key, row)) {
            disk.extend((0 .. 8).rev().map(|bit| byte >> bit & 1 == 1));
        }
    }
    disk
}

fn label_regions(disk: &BitSlice) -> (u32, Vec<i32>) {
    let mut labels = vec![-1; disk.len()];
    let mut regions = 0u32;
    for start in 0 .. disk.len() {
        if !disk[start] || labels[start] != -1 {continue}
        let region = regions as i32;
        regions += 1;
        let mut pending = vec![start];
        while let Some(cell) = pending.pop() {
            if labels[cell] != -1 {continue}
            labels[cell] = region;
            let (row, col) = (cell / 128, cell % 128);
            let neighbours = [
                (row > 0).then(|| cell - 128),
                (row < 127).then(|| cell + 128),
                (col > 0).then(|| cell - 1),
                (col < 127).then(|| cell + 1),
            ];
            pending.extend(neighbours.into_iter().flatten()
                .filter(|&at| disk[at] && labels[at] == -1));
        }
    }
    (regions, labels)
}

////////////////////////////////////////////////////////////////////////////////

fn day1(part: u8, input: &str) -> String {
    let digits = input.trim().as_bytes();
    let shift = if part == 1 {1} else {digits.len() / 2};
    digits.iter().enumerate()
          .filter(|&(at, &digit)| digit == digits[(at + shift) % digits.len()])
          .map(|(_, &digit)| (digit - b'0') as u32)
          .sum::<u32>().to_string()
}

fn day2(part: u8, input: &str) -> String {
    input.trim().lines().map(|line| {
        let cells: Vec<u32> = line.split_whitespace()
                                  .map(|n| n.parse().expect(line)).collect();
        if part == 1 {
            let MinMaxResult::MinMax(min, max) = cells.iter().minmax() else {
                panic!("expected more than one cell in {}", line)
            };
            max - min
        } else {
            let (big, small) = cells.iter()
                .tuple_combinations()
                .map(|(&x, &y)| (x.max(y), x.min(y)))
                .find(|&(big, small)| big % small == 0)
                .unwrap_or_else(|| panic!("no evenly dividing pair in {}", line));
            big / small
        }
    }).sum::<u32>().to_string()
}

fn day3(part: u8, input: &str) -> String {
    let target: u64 = input.trim().parse().expect(input);
    if part == 1 {
        let (x, y) = spiral().nth(target as usize - 1).unwrap();
        (x.abs() + y.abs()).to_string()
    } else {
        let mut values = FxHashMap::default();
        values.insert((0, 0), 1u64);
        spiral().skip(1).find_map(|(x, y)| {
            let value = (-1 ..= 1).cartesian_product(-1 ..= 1)
                .map(|(dx, dy)| values.get(&(x + dx, y + dy)).copied().unwrap_or(0))
                .sum::<u64>();
            values.insert((x, y), value);
            (value > target).then(|| value.to_string())
        }).unwrap()
    }
}

fn day4(part: u8, input: &str) -> String {
    input.trim().lines().filter(|line| {
        line.split_whitespace().map(|word|
            if part == 1 {word.as_bytes().to_vec()} else {word.bytes().sorted().collect()}
        ).all_unique()
    }).count().to_string()
}

fn day5(part: u8, input: &str) -> String {
    let mut jumps: Vec<i64> = input.trim().lines()
        .map(|line| line.trim().parse().expect(line)).collect();
    let mut pc = 0i64;
    let mut moves = 0u64;
    while let Some(jump) = usize::try_from(pc).ok().and_then(|pc| jumps.get_mut(pc)) {
        let offset = *jump;
        *jump += if part == 2 && offset >= 3 {-1} else {1};
        pc += offset;
        moves += 1;
    }
    moves.to_string()
}

fn day6(part: u8, input: &str) -> String {
    let mut banks: ArrayVec<u32, 16> = input.split_whitespace()
        .map(|n| n.parse().expect(n)).collect();
    let mut seen = FxHashMap::default();
    for cycle in 0u32 .. {
        if let Some(first) = seen.insert(banks.clone(), cycle) {
            return if part == 1 {cycle} else {cycle - first}.to_string()
        }
        let top = *banks.iter().max().unwrap();
        let mut at = banks.iter().position(|&bank| bank == top).unwrap();
        let mut blocks = std::mem::replace(&mut banks[at], 0);
        while blocks > 0 {
            at = (at + 1) % banks.len();
            banks[at] += 1;
            blocks -= 1;
        }
    }
    unreachable!()
}

fn day7(part: u8, input: &str) -> String {
    let line_re = Regex::new(r"^(\w+) \((\d+)\)(?: -> (.*))?$").unwrap();
    let mut weights: FxHashMap<&str, i64> = FxHashMap::default();
    let mut children: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
    let mut parents: FxHashMap<&str, &str> = FxHashMap::default();
    for line in input.trim().lines() {
        let caps = line_re.captures(line.trim()).unwrap_or_else(|| panic!("cannot parse {}", line));
        let name = caps.get(1).unwrap().as_str();
        weights.insert(name, caps[2].parse().expect(line));
        let kids: Vec<&str> = caps.get(3).map_or(vec![], |list| list.as_str().split(", ").collect());
        for &kid in &kids {parents.insert(kid, name);}
        children.insert(name, kids);
    }

    let mut root = *weights.keys().next().expect("empty tower");
    while let Some(&parent) = parents.get(root) {root = parent}
    if part == 1 {return root.to_string()}

    fn weigh<'a>(node: &'a str,
                 weights: &FxHashMap<&'a str, i64>,
                 children: &FxHashMap<&'a str, Vec<&'a str>>,
                 totals: &mut FxHashMap<&'a str, i64>) -> i64 {
        let total = weights[node] + children[node].iter()
            .map(|&kid| weigh(kid, weights, children, totals)).sum::<i64>();
        totals.insert(node, total);
        total
    }
    let mut totals = FxHashMap::default();
    weigh(root, &weights, &children, &mut totals);

    // descend into the odd-weight subtree until its own children balance;
    // that node's weight absorbs the difference
    let mut node = root;
    let mut delta = 0;
    loop {
        let kids = &children[node];
        let odd = kids.iter().find(|&&kid|
            kids.iter().filter(|&&other| totals[other] == totals[kid]).count() == 1
        );
        match odd {
            Some(&odd) => {
                let expected = kids.iter().map(|&kid| totals[kid])
                    .find(|&total| total != totals[odd]).unwrap();
                delta = expected - totals[odd];
                node = odd;
            }
            None => return (weights[node] + delta).to_string(),
        }
    }
}

fn day8(part: u8, input: &str) -> String {
    let line_re = Regex::new(r"^(\w+) (inc|dec) (-?\d+) if (\w+) (>=|<=|==|!=|>|<) (-?\d+)$").unwrap();
    let mut regs: FxHashMap<&str, i64> = FxHashMap::default();
    let mut highest = 0;
    for line in input.trim().lines() {
        let caps = line_re.captures(line.trim()).unwrap_or_else(|| panic!("cannot parse {}", line));
        let against = regs.get(caps.get(4).unwrap().as_str()).copied().unwrap_or(0);
        let value: i64 = caps[6].parse().expect(line);
        let hold = match &caps[5] {
            ">" => against > value, ">=" => against >= value,
            "<" => against < value, "<=" => against <= value,
            "==" => against == value, "!=" => against != value,
            _ => unreachable!()
        };
        if hold {
            let amount: i64 = caps[3].parse().expect(line);
            let reg = regs.entry(caps.get(1).unwrap().as_str()).or_insert(0);
            *reg += if &caps[2] == "inc" {amount} else {-amount};
            highest = highest.max(*reg);
        }
    }
    if part == 1 {regs.values().max().expect("no instruction ran").to_string()}
    else {highest.to_string()}
}

fn day9(part: u8, input: &str) -> String {
    let mut score = 0u32;
    let mut depth = 0u32;
    let mut garbage = 0u32;
    let mut in_garbage = false;
    let mut stream = input.trim().chars();
    while let Some(c) = stream.next() {
        match (in_garbage, c) {
            (true, '!') => {stream.next();}
            (true, '>') => in_garbage = false,
            (true, _) => garbage += 1,
            (false, '{') => depth += 1,
            (false, '}') => {score += depth; depth -= 1}
            (false, '<') => in_garbage = true,
            (false, _) => ()
        }
    }
    if part == 1 {score} else {garbage}.to_string()
}

fn day10(part: u8, input: &str) -> String {
    if part == 1 {
        let mut knots = knot::Knots::new(256);
        for len in input.trim().split(',') {
            knots.twist(len.trim().parse().expect(len));
        }
        knots.proof().to_string()
    } else {
        knot::hex_digest(input.trim())
    }
}

fn day11(part: u8, input: &str) -> String {
    // axial hex coordinates; n/s move along r, ne/sw along q
    let distance = |q: i64, r: i64| (q.abs() + r.abs() + (q + r).abs()) / 2;
    let (mut q, mut r) = (0, 0);
    let mut furthest = 0;
    for step in input.trim().split(',') {
        let (dq, dr) = match step.trim() {
            "n" => (0, -1), "ne" => (1, -1), "se" => (1, 0),
            "s" => (0, 1), "sw" => (-1, 1), "nw" => (-1, 0),
            dir => panic!("unexpected direction {}", dir)
        };
        q += dq; r += dr;
        furthest = furthest.max(distance(q, r));
    }
    if part == 1 {distance(q, r)} else {furthest}.to_string()
}

fn day12(part: u8, input: &str) -> String {
    // village ids are dense 0..n, so the graph can live in a vector
    let graph: Vec<Vec<usize>> = input.trim().lines().map(|line| {
        let (_, peers) = line.split_once(" <-> ").unwrap_or_else(|| panic!("cannot parse {}", line));
        peers.split(',').map(|peer| peer.trim().parse().expect(line)).collect()
    }).collect();

    let mut visited = bitvec![0; graph.len()];
    let mut groups = 0u32;
    let mut group0_size = 0u32;
    for start in 0 .. graph.len() {
        if visited[start] {continue}
        groups += 1;
        let mut size = 0;
        let mut pending = vec![start];
        while let Some(node) = pending.pop() {
            if visited.replace(node, true) {continue}
            size += 1;
            pending.extend(graph[node].iter().copied().filter(|&peer| !visited[peer]));
        }
        if start == 0 {group0_size = size}
    }
    if part == 1 {group0_size} else {groups}.to_string()
}

fn day13(part: u8, input: &str) -> String {
    let layers: Vec<(u64, u64)> = input.trim().lines().map(|line| {
        let (depth, range) = line.split_once(": ").unwrap_or_else(|| panic!("cannot parse {}", line));
        (depth.trim().parse().expect(line), range.trim().parse().expect(line))
    }).collect();
    let caught = |depth: u64, range: u64, delay: u64|
        range == 1 || (depth + delay) % (2 * (range - 1)) == 0;

    if part == 1 {
        layers.iter().filter(|&&(depth, range)| caught(depth, range, 0))
              .map(|&(depth, range)| depth * range).sum::<u64>().to_string()
    } else {
        (0 ..).find(|&delay|
            !layers.iter().any(|&(depth, range)| caught(depth, range, delay))
        ).unwrap().to_string()
    }
}

fn day14(part: u8, input: &str) -> String {
    let disk = build_disk(input.trim());
    if part == 1 {disk.count_ones().to_string()}
    else {label_regions(&disk).0.to_string()}
}

fn day15(part: u8, input: &str) -> String {
    let (seed_a, seed_b) = input.trim().lines().map(|line|
        line.split_whitespace().last().unwrap().parse::<u64>().expect(line)
    ).collect_tuple().expect("two generator seeds");

    let generator = |seed: u64, factor: u64, multiple: u64| {
        let mut value = seed;
        std::iter::from_fn(move || loop {
            value = value * factor % 2147483647;
            if value % multiple == 0 {return Some(value)}
        })
    };
    let (multiple_a, multiple_b, rounds) =
        if part == 1 {(1, 1, 40_000_000)} else {(4, 8, 5_000_000)};
    generator(seed_a, 16807, multiple_a)
        .zip(generator(seed_b, 48271, multiple_b))
        .take(rounds)
        .filter(|(a, b)| a & 0xFFFF == b & 0xFFFF)
        .count().to_string()
}

fn day16(part: u8, input: &str) -> String {
    let mut line: ArrayVec<u8, 16> = (b'a' ..= b'p').collect();
    if part == 1 {
        dance(&mut line, input);
        String::from_utf8(line.to_vec()).unwrap()
    } else {
        // the dance permutes a tiny state space, so it cycles back to the
        // start well before a billion repeats
        let mut states = vec![line.clone()];
        loop {
            dance(&mut line, input);
            if line == states[0] {break}
            states.push(line.clone());
        }
        String::from_utf8(states[1_000_000_000 % states.len()].to_vec()).unwrap()
    }
}

fn day17(part: u8, input: &str) -> String {
    let step: usize = input.trim().parse().expect(input);
    if part == 1 {
        let mut buffer = vec![0u32];
        let mut pos = 0;
        for value in 1 ..= 2017 {
            pos = (pos + step) % buffer.len() + 1;
            buffer.insert(pos, value);
        }
        buffer[(pos + 1) % buffer.len()].to_string()
    } else {
        // 0 never moves from the front, so only track what lands behind it
        let mut pos = 0;
        let mut after_zero = 0u32;
        for value in 1 ..= 50_000_000u32 {
            pos = (pos + step) % value as usize + 1;
            if pos == 1 {after_zero = value}
        }
        after_zero.to_string()
    }
}

fn day18(part: u8, input: &str) -> String {
    let code = duet::parse(input).unwrap_or_else(|err| panic!("{}", err));
    if part == 1 {
        duet::run_solo(&code).recovered.expect("program never recovered a sound").to_string()
    } else {
        let mut duet = duet::Duet::new(&code);
        duet.run();
        duet.core(1).sent().to_string()
    }
}

fn day19(part: u8, input: &str) -> String {
    let board: Vec<&[u8]> = input.lines().map(|line| line.as_bytes()).collect();
    let piece = |x: i64, y: i64| *usize::try_from(y).ok()
        .and_then(|y| board.get(y))
        .and_then(|row| usize::try_from(x).ok().and_then(|x| row.get(x)))
        .unwrap_or(&b' ');

    let mut x = board[0].iter().position(|&c| c == b'|').expect("entry point on the top row") as i64;
    let mut y = 0;
    let (mut dx, mut dy) = (0, 1);
    let mut trail = String::new();
    let mut steps = 0u32;
    loop {
        let here = piece(x, y);
        if here == b' ' {break}
        steps += 1;
        if here.is_ascii_alphabetic() {trail.push(here as char)}
        if here == b'+' {
            // corners join two perpendicular segments; the dead side is blank
            (dx, dy) = if piece(x + dy, y + dx) != b' ' {(dy, dx)} else {(-dy, -dx)};
        }
        x += dx; y += dy;
    }
    if part == 1 {trail} else {steps.to_string()}
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let days = [
        day1, day2, day3, day4, day5, day6, day7, day8, day9, day10,
        day11, day12, day13, day14, day15, day16, day17, day18, day19
    ];

    let args = std::env::args().collect::<Vec<_>>();
    let (day_arg, part_arg, fname) = match &args[..] {
        [_, day_arg, part_arg] => (day_arg, part_arg, format!("day{}.in", day_arg)),
        [_, day_arg, test_arg, part_arg] => (day_arg, part_arg, format!("day{}test{}.in", day_arg, test_arg)),
        _ => {
            println!("exactly two or three arguments expected - day number, optionally test number and 1/2 for part");
            std::process::exit(1);
        }
    };

    assert!(part_arg == "1" || part_arg == "2");
    let day: usize = day_arg.parse()?;
    let input = std::fs::read_to_string(dbg!(fname))?;
    let time = std::time::Instant::now();
    println!("{}", days[day - 1](part_arg.parse()?, &input));
    println!("{} seconds elapsed", time.elapsed().as_secs_f32());
    Ok(())
}
